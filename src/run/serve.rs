//! The `serve` subcommand.

use anyhow::{Context, Result};

use crate::config::{FetchConfig, PipelineOptions, ServeArgs};
use crate::fetch::HttpFetcher;
use crate::server::{start_server, AppState};
use crate::storage::SchemaStore;

/// Starts the HTTP endpoint described by `args` and serves until shutdown.
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let store = match &args.db_path {
        Some(path) => Some(
            SchemaStore::open(path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?,
        ),
        None => None,
    };

    let fetcher = HttpFetcher::from_config(&FetchConfig::from(&args.fetch))
        .context("Failed to initialize HTTP client")?;
    let state = AppState::new(fetcher, PipelineOptions::from(&args.pipeline), store);

    start_server(&args.bind, args.port, state).await
}
