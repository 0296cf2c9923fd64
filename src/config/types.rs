//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. The library-facing structs (`FetchConfig`,
//! `PipelineOptions`) can be constructed without going through clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_MAX_CONCURRENCY, DEFAULT_PORT, DEFAULT_USER_AGENT,
    FETCH_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "schema_audit",
    version,
    about = "Detects and validates Schema.org structured data on web pages"
)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect structured data on one or more pages and print JSON reports
    Detect(DetectArgs),
    /// Serve schema detection over HTTP
    Serve(ServeArgs),
}

/// Options for the `detect` subcommand.
#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// URLs to inspect
    pub urls: Vec<String>,

    /// File with one URL per line (blank lines and `#` comments are skipped)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// SQLite database to upsert reports into, keyed by URL
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Maximum pages processed concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Options for the `serve` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// SQLite database to upsert reports into when a request carries a `siteId`
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// HTTP fetch flags shared by subcommands.
#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Pipeline flags shared by subcommands.
#[derive(Debug, Clone, Args)]
pub struct PipelineArgs {
    /// Include the normalised records under `schemas.raw`
    #[arg(long)]
    pub include_raw_schema: bool,

    /// Skip logo discovery and omit the `logo` key
    #[arg(long)]
    pub no_logo: bool,

    /// Declared type to leave out of the report entirely (repeatable)
    #[arg(long = "exclude", value_name = "TYPE")]
    pub excluded_types: Vec<String>,
}

/// Fetcher configuration (no CLI dependencies).
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total request timeout
    pub timeout: Duration,
    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&FetchArgs> for FetchConfig {
    fn from(args: &FetchArgs) -> Self {
        Self {
            timeout: Duration::from_secs(args.timeout_seconds),
            user_agent: args.user_agent.clone(),
        }
    }
}

/// Switches for the schema-detection pipeline.
///
/// # Examples
///
/// ```
/// use schema_audit::PipelineOptions;
///
/// let options = PipelineOptions {
///     include_raw_schema: true,
///     ..Default::default()
/// };
/// assert!(options.include_logo_discovery);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Attach the normalised records to the report
    pub include_raw_schema: bool,
    /// Look for an organisation logo and emit the `logo` key
    pub include_logo_discovery: bool,
    /// Declared types dropped before grouping (exact, case-sensitive match)
    pub excluded_types: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            include_raw_schema: false,
            include_logo_discovery: true,
            excluded_types: Vec::new(),
        }
    }
}

impl From<&PipelineArgs> for PipelineOptions {
    fn from(args: &PipelineArgs) -> Self {
        Self {
            include_raw_schema: args.include_raw_schema,
            include_logo_discovery: !args.no_logo,
            excluded_types: args.excluded_types.clone(),
        }
    }
}

impl PipelineOptions {
    /// Returns true if records of `declared_type` must be left out of the report.
    pub fn is_excluded(&self, declared_type: Option<&str>) -> bool {
        match declared_type {
            Some(t) => self.excluded_types.iter().any(|excluded| excluded == t),
            None => false,
        }
    }
}
