//! The schema-detection pipeline.
//!
//! markup -> records (JSON-LD, Microdata, RDFa) -> validation -> grouped report.
//! The pipeline never fails: a fetch error becomes the detection-error report.

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use scraper::Html;
use url::Url;

use super::logo::discover_logo;
use super::report::SchemaReport;
use crate::config::PipelineOptions;
use crate::fetch::Fetcher;
use crate::parse::extract_records;

/// Runs the pipeline on already-fetched markup.
///
/// `base_url` is used to resolve relative Microdata/RDFa URLs and is echoed in
/// the report; an unparsable base simply disables resolution.
pub fn detect_schemas_in_markup(
    markup: &str,
    base_url: &str,
    options: &PipelineOptions,
) -> SchemaReport {
    let document = Html::parse_document(markup);
    let base = Url::parse(base_url).ok();
    let records = extract_records(&document, base.as_ref());

    let logo = if options.include_logo_discovery {
        discover_logo(&records, &document)
    } else {
        None
    };

    let report = SchemaReport::from_records(base_url, records, logo, options);
    debug!(
        "{}: {} records in {} type groups",
        base_url,
        report.schemas.summary.len(),
        report.schemas.details.len()
    );
    report
}

/// Fetches `url` and runs the pipeline on the markup.
///
/// A fetch failure is logged and converted into the detection-error report.
pub async fn detect_schemas<F: Fetcher>(
    fetcher: &F,
    url: &str,
    options: &PipelineOptions,
) -> SchemaReport {
    match fetcher.fetch(url).await {
        Ok(markup) => detect_schemas_in_markup(&markup, url, options),
        Err(e) => {
            warn!("Schema detection failed for {url}: {e}");
            SchemaReport::detection_error(url, options)
        }
    }
}

/// Runs `detect_schemas` for several URLs, at most `max_concurrency` at a time.
///
/// Reports are returned in input order.
pub async fn detect_many<F: Fetcher>(
    fetcher: &F,
    urls: &[String],
    options: &PipelineOptions,
    max_concurrency: usize,
) -> Vec<SchemaReport> {
    stream::iter(urls)
        .map(|url| detect_schemas(fetcher, url, options))
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}
