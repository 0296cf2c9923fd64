//! HTML parsing and structured-data extraction.
//!
//! This module extracts Schema.org structured data from HTML content:
//! - JSON-LD (`<script type="application/ld+json">`)
//! - Microdata (`itemscope` / `itemprop`)
//! - RDFa type assertions (`typeof`, `rdf:type`)
//! - The Open Graph image meta tag
//!
//! All parsing is done on a `scraper::Html` document.

mod json_ld;
mod meta;
mod microdata;
mod rdfa;
mod record;

use log::debug;
use scraper::Html;
use url::Url;

// Re-export public API
pub use json_ld::extract_json_ld;
pub use meta::extract_og_image;
pub use microdata::extract_microdata;
pub use rdfa::{extract_rdf_type_iris, extract_rdfa};
pub use record::{last_path_segment, normalize_context, FieldValue, SourceFormat, StructuredRecord};

/// Extracts every structured-data record from a document.
///
/// Order is fixed: all JSON-LD records, then all Microdata items, then all RDFa
/// type assertions, each in document order.
pub fn extract_records(document: &Html, base_url: Option<&Url>) -> Vec<StructuredRecord> {
    let json_ld = extract_json_ld(document);
    let microdata = extract_microdata(document, base_url);
    let rdfa = extract_rdfa(document, base_url);

    debug!(
        "Extracted {} JSON-LD, {} Microdata, {} RDFa records",
        json_ld.len(),
        microdata.len(),
        rdfa.len()
    );

    let mut records = json_ld;
    records.extend(microdata);
    records.extend(rdfa);
    records
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
