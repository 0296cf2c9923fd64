//! Logo discovery.
//!
//! Best effort: the first Organization or LocalBusiness record (JSON-LD or
//! Microdata) carrying a `logo` wins; otherwise the Open Graph image is used.

use scraper::Html;

use crate::parse::{extract_og_image, FieldValue, SourceFormat, StructuredRecord};

const LOGO_OWNER_TYPES: &[&str] = &["Organization", "LocalBusiness"];

/// Finds a logo URL in the records, falling back to `og:image`.
pub fn discover_logo(records: &[StructuredRecord], document: &Html) -> Option<String> {
    logo_from_records(records).or_else(|| extract_og_image(document))
}

/// First structured-data logo in record order.
pub fn logo_from_records(records: &[StructuredRecord]) -> Option<String> {
    records
        .iter()
        .filter(|r| matches!(r.source_format, SourceFormat::JsonLd | SourceFormat::Microdata))
        .filter(|r| {
            r.declared_type
                .as_deref()
                .is_some_and(|t| LOGO_OWNER_TYPES.contains(&t))
        })
        .find_map(|r| r.field("logo").and_then(logo_url))
}

/// A logo is either a URL string or an image object exposing `url`.
fn logo_url(value: &FieldValue) -> Option<String> {
    let url = match value {
        FieldValue::Text(s) => Some(s.as_str()),
        FieldValue::Map(_) => value.get("url").and_then(FieldValue::as_str),
        _ => None,
    }?;
    let url = url.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
