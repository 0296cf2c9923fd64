//! HTTP endpoint serving schema detection.
//!
//! Provides two endpoints:
//! - `POST /api/schema-detection` - runs the pipeline for `{"url", "siteId"?}`
//! - `GET /health` - liveness probe
//!
//! The detection endpoint answers 200 with a report in every case, including
//! fetch failures.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::fetch::Fetcher;
use handlers::{detect_handler, health_handler};
pub use types::{AppState, DetectRequest};

/// Builds the router for `state`.
pub fn router<F: Fetcher + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/api/schema-detection", post(detect_handler::<F>))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds `bind:port` and serves until the process exits.
pub async fn start_server<F: Fetcher + 'static>(
    bind: &str,
    port: u16,
    state: AppState<F>,
) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}"))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", bind, port, e))?;

    log::info!("Schema detection server listening on http://{bind}:{port}/");
    log::info!("  - Detect: POST http://{bind}:{port}/api/schema-detection");
    log::info!("  - Health: GET http://{bind}:{port}/health");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
