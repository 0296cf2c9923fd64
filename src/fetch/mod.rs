//! Page markup retrieval.
//!
//! The pipeline depends on the `Fetcher` trait rather than on a concrete HTTP
//! client, so callers can hand in markup they already scraped (`StaticMarkup`)
//! or fetch over the network (`HttpFetcher`).

mod request;

use std::future::Future;

use crate::error_handling::FetchError;

pub use request::HttpFetcher;

/// Retrieves the markup of a page.
pub trait Fetcher: Send + Sync {
    /// Returns the page body for `url`, or why it could not be retrieved.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// A fetcher that always returns the same markup.
///
/// Used when the page was scraped elsewhere; the URL only serves as base URL.
#[derive(Debug, Clone)]
pub struct StaticMarkup {
    markup: String,
}

impl StaticMarkup {
    /// Wraps pre-scraped markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

impl Fetcher for StaticMarkup {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.markup.clone())
    }
}
