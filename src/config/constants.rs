//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits and the fixed strings that appear in reports.

use std::time::Duration;

// Network operation timeouts
/// Total fetch timeout in seconds (connect + headers + body)
pub const FETCH_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Hard ceiling around a single fetch, enforced with `tokio::time::timeout`
/// on top of the client timeout
pub const FETCH_HARD_TIMEOUT: Duration = Duration::from_secs(FETCH_TIMEOUT_SECS + 2);

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Accept header sent with page fetches
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// Response and body size limits
/// Maximum response body size in bytes (10MB)
/// Larger pages are rejected as a fetch failure
pub const MAX_RESPONSE_BODY_SIZE: usize = 10 * 1024 * 1024;

// Concurrency
/// Default number of pages processed at once by `detect` and `detect_many`
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

// HTTP server
/// Default port for `serve`
pub const DEFAULT_PORT: u16 = 3000;
/// Default bind address for `serve`
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

// Vocabulary
/// Canonical Schema.org context every record is normalised to
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";
/// `rdf:type` predicate IRI
pub const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// Report strings
/// Report message when at least one record was found
pub const MESSAGE_DETECTED: &str = "Structured data detected";
/// Report message when the page had no structured data
pub const MESSAGE_NONE_DETECTED: &str = "No structured data detected";
/// Report message when the page could not be fetched
pub const MESSAGE_DETECTION_ERROR: &str = "Error occurred during schema detection";
/// Group label for records without a declared type
pub const UNKNOWN_TYPE_LABEL: &str = "Unknown";
