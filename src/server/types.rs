//! Server data structures.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::PipelineOptions;
use crate::storage::SchemaStore;

/// Shared state for the server
pub struct AppState<F> {
    /// Markup source for detection requests
    pub fetcher: Arc<F>,
    /// Options applied to every request
    pub options: Arc<PipelineOptions>,
    /// Report store; reports are persisted only when present
    pub store: Option<SchemaStore>,
}

impl<F> AppState<F> {
    /// Creates server state.
    pub fn new(fetcher: F, options: PipelineOptions, store: Option<SchemaStore>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            options: Arc::new(options),
            store,
        }
    }
}

// Manual impl: `F` itself need not be `Clone`
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            options: Arc::clone(&self.options),
            store: self.store.clone(),
        }
    }
}

/// Body of `POST /api/schema-detection`
#[derive(Debug, Clone, Deserialize)]
pub struct DetectRequest {
    /// Page to inspect; `https://` is prepended when no scheme is given
    pub url: String,
    /// Key under which the report is stored
    #[serde(rename = "siteId", default)]
    pub site_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_request_site_id_optional() {
        let req: DetectRequest = serde_json::from_str(r#"{"url": "a.test"}"#).unwrap();
        assert_eq!(req.site_id, None);

        let req: DetectRequest =
            serde_json::from_str(r#"{"url": "a.test", "siteId": "42"}"#).unwrap();
        assert_eq!(req.site_id.as_deref(), Some("42"));
    }
}
