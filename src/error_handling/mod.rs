//! Error types.
//!
//! This module provides the typed errors raised at the edges of the crate:
//! - **Fetch errors**: network failure, timeout or non-success status while
//!   retrieving page markup. The pipeline absorbs these into a degenerate report.
//! - **Database errors**: failures of the persistence adapter.
//! - **Initialization errors**: logger and HTTP client setup.
//!
//! Malformed JSON-LD and validation failures are not errors; they are data.

mod types;

// Re-export public API
pub use types::{DatabaseError, FetchError, InitializationError};
