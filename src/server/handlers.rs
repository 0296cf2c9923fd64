//! Server HTTP handlers.

use axum::extract::State;
use axum::Json;
use log::{info, warn};

use super::types::{AppState, DetectRequest};
use crate::app::validate_and_normalize_url;
use crate::fetch::Fetcher;
use crate::schema::{detect_schemas, SchemaReport};

/// Runs detection for the requested URL.
///
/// Always answers with a report. An invalid URL yields the detection-error
/// report; storage failures are logged and do not change the response.
pub async fn detect_handler<F: Fetcher + 'static>(
    State(state): State<AppState<F>>,
    Json(request): Json<DetectRequest>,
) -> Json<SchemaReport> {
    let report = match validate_and_normalize_url(&request.url) {
        Some(url) => detect_schemas(state.fetcher.as_ref(), &url, &state.options).await,
        None => SchemaReport::detection_error(&request.url, &state.options),
    };

    if let (Some(store), Some(site_id)) = (&state.store, request.site_id.as_deref()) {
        match store.upsert_report(site_id, &report).await {
            Ok(()) => info!("Stored schema report for site {site_id}"),
            Err(e) => warn!("Failed to store schema report for site {site_id}: {e}"),
        }
    }

    Json(report)
}

/// Liveness probe
pub async fn health_handler() -> &'static str {
    "ok"
}
