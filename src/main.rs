//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `schema_audit` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use schema_audit::initialization::init_logger_with;
use schema_audit::{run_detect, run_serve, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG.
    // Try the current directory first, then the executable's directory.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match &cli.command {
        Command::Detect(args) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            run_detect(args, &mut out).await.map(|_| ())
        }
        Command::Serve(args) => run_serve(args).await,
    };

    if let Err(e) = result {
        eprintln!("schema_audit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
