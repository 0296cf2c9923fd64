//! URL list input.

use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::url::validate_and_normalize_url;

/// Reads one URL per line from `reader`, skipping blank lines and `#` comments.
///
/// Lines are trimmed but not validated.
pub fn read_url_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read URL list")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}

/// Combines positional URLs with those listed in `file` (`-` reads stdin).
///
/// Every entry is normalized; invalid entries are logged and dropped.
pub fn collect_urls(positional: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut raw: Vec<String> = positional.to_vec();

    if let Some(path) = file {
        let listed = if path.as_os_str() == "-" {
            info!("Reading URLs from stdin");
            read_url_lines(std::io::stdin().lock())?
        } else {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            read_url_lines(BufReader::new(file))?
        };
        info!("Read {} URLs from input", listed.len());
        raw.extend(listed);
    }

    Ok(raw
        .iter()
        .filter_map(|url| validate_and_normalize_url(url))
        .collect())
}
