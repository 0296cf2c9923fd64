//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// The report could not be turned into (or read back from) JSON.
    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure to retrieve page markup.
///
/// Never escapes the pipeline: `detect_schemas` turns it into the
/// "Error occurred during schema detection" report.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL does not parse or is not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, connect, TLS, client timeout).
    #[error("HTTP request error: {0}")]
    Request(#[from] ReqwestError),

    /// The hard fetch ceiling elapsed.
    #[error("Fetch of {url} timed out after {secs}s")]
    Timeout {
        /// Requested URL
        url: String,
        /// Ceiling that elapsed, in seconds
        secs: u64,
    },

    /// Non-2xx response.
    #[error("HTTP status {status} returned for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// The body could not be read as text or was too large.
    #[error("Response body error: {0}")]
    Body(String),
}
