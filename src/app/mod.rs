//! Command-line application helpers.
//!
//! URL validation and input-list reading used by the `detect` and `serve`
//! subcommands.

pub mod input;
pub mod url;

// Re-export public API
pub use input::{collect_urls, read_url_lines};
pub use url::validate_and_normalize_url;
