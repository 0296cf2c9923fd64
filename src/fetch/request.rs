//! HTTP page fetching.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use url::Url;

use super::Fetcher;
use crate::config::{FetchConfig, ACCEPT_HTML, FETCH_HARD_TIMEOUT, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{FetchError, InitializationError};
use crate::initialization::init_client;

/// Fetches pages with a shared `reqwest::Client`.
///
/// Every fetch is bounded twice: by the client's own timeout and by a hard
/// `tokio::time::timeout` around the send and the body read.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    hard_timeout: Duration,
}

impl HttpFetcher {
    /// Wraps an existing client with the default hard timeout.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            hard_timeout: FETCH_HARD_TIMEOUT,
        }
    }

    /// Builds a client from `config`; the hard timeout tracks the configured timeout.
    pub fn from_config(config: &FetchConfig) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self {
            client,
            hard_timeout: config.timeout + Duration::from_secs(2),
        })
    }

    fn timeout_error(&self, url: &str) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            secs: self.hard_timeout.as_secs(),
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let request = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML);

        let response = tokio::time::timeout(self.hard_timeout, request.send())
            .await
            .map_err(|_| self.timeout_error(url))??;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > MAX_RESPONSE_BODY_SIZE as u64 {
                return Err(FetchError::Body(format!(
                    "{url}: declared body of {length} bytes exceeds limit"
                )));
            }
        }

        let body = tokio::time::timeout(self.hard_timeout, response.text())
            .await
            .map_err(|_| self.timeout_error(url))??;

        if body.len() > MAX_RESPONSE_BODY_SIZE {
            return Err(FetchError::Body(format!(
                "{url}: body of {} bytes exceeds limit",
                body.len()
            )));
        }

        debug!("Fetched {} ({} bytes, status {})", url, body.len(), status);
        Ok(body)
    }
}
