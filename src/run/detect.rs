//! The `detect` subcommand: fetch, detect, print JSONL, optionally persist.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::app::collect_urls;
use crate::config::{DetectArgs, FetchConfig, PipelineOptions};
use crate::fetch::HttpFetcher;
use crate::schema::detect_many;
use crate::storage::SchemaStore;

/// Counts from a `detect` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectSummary {
    /// Reports written
    pub total: usize,
    /// Reports with at least one record
    pub with_data: usize,
    /// Reports for pages that could not be fetched
    pub fetch_errors: usize,
    /// Reports persisted to the database
    pub stored: usize,
}

/// Runs detection for every URL in `args` and writes one JSON report per line
/// to `out`, in input order.
///
/// When `args.db_path` is set, each report is also upserted keyed by its URL.
/// A failed upsert is logged and does not abort the run.
///
/// # Errors
///
/// Fails when the input file cannot be read, no valid URL remains, or the
/// database or HTTP client cannot be initialized.
pub async fn run_detect<W: Write>(args: &DetectArgs, out: &mut W) -> Result<DetectSummary> {
    let start = Instant::now();
    let urls = collect_urls(&args.urls, args.file.as_deref())?;
    if urls.is_empty() {
        anyhow::bail!("No valid URLs to inspect");
    }

    let store = match &args.db_path {
        Some(path) => Some(
            SchemaStore::open(path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?,
        ),
        None => None,
    };

    let fetcher = HttpFetcher::from_config(&FetchConfig::from(&args.fetch))
        .context("Failed to initialize HTTP client")?;
    let options = PipelineOptions::from(&args.pipeline);

    info!("Inspecting {} URL(s)", urls.len());
    let reports = detect_many(&fetcher, &urls, &options, args.max_concurrency).await;

    let mut summary = DetectSummary::default();
    for report in &reports {
        serde_json::to_writer(&mut *out, report).context("Failed to write report")?;
        writeln!(out).context("Failed to write report")?;

        summary.total += 1;
        if report.is_detection_error() {
            summary.fetch_errors += 1;
        } else if !report.schemas.summary.is_empty() {
            summary.with_data += 1;
        }

        if let Some(store) = &store {
            match store.upsert_report(&report.url, report).await {
                Ok(()) => summary.stored += 1,
                Err(e) => warn!("Failed to store report for {}: {e}", report.url),
            }
        }
    }
    out.flush().context("Failed to flush output")?;

    info!(
        "Inspected {} URL(s) in {:.1}s: {} with structured data, {} fetch errors",
        summary.total,
        start.elapsed().as_secs_f64(),
        summary.with_data,
        summary.fetch_errors
    );
    Ok(summary)
}
