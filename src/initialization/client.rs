//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{FetchConfig, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for page fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the fetch config
/// - Total timeout from the fetch config
/// - A TCP connect timeout no larger than the total timeout
/// - Redirect following (reqwest default policy, up to 10 hops)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &FetchConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let connect_timeout = config
        .timeout
        .min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));
    let client = ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
