//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, report messages, vocabulary identifiers)
//! - CLI option types and parsing
//! - Library-level option structs for the fetcher and the pipeline

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Cli, Command, DetectArgs, FetchArgs, FetchConfig, LogFormat, LogLevel, PipelineArgs,
    PipelineOptions, ServeArgs,
};
