//! URL validation and normalization utilities.

use log::warn;

/// Maximum URL length (2048 characters), matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a URL.
///
/// Adds an `https://` prefix if no http(s) scheme is present, then checks that
/// the result parses, has a host and uses http/https. Surrounding whitespace is
/// trimmed. Logs a warning and returns `None` for anything else.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    // Checked after normalization since the prefix can push a URL over the limit
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            normalized.chars().take(50).collect::<String>()
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
            match parsed.scheme() {
                "http" | "https" => Some(normalized),
                _ => {
                    warn!("Skipping unsupported scheme for URL: {url}");
                    None
                }
            }
        }
        _ => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}
