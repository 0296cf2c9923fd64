//! schema_audit library: Schema.org structured-data detection and validation
//!
//! This library fetches a web page, extracts its structured data (JSON-LD,
//! Microdata and RDFa), validates each record against a small table of
//! required fields, and returns a grouped report. A fetch failure never
//! surfaces as an error: it yields a report with the detection-error message.
//!
//! # Example
//!
//! ```
//! use schema_audit::{detect_schemas_in_markup, PipelineOptions};
//!
//! let html = r#"<script type="application/ld+json">
//!     {"@context": "https://schema.org", "@type": "Product", "name": "Widget"}
//! </script>"#;
//!
//! let report = detect_schemas_in_markup(html, "https://shop.example", &PipelineOptions::default());
//! assert_eq!(report.message, "Structured data detected");
//! assert_eq!(
//!     report.schemas.summary[0].error.as_deref(),
//!     Some("Product is missing required field 'offers'")
//! );
//! ```
//!
//! # Requirements
//!
//! The fetching entry points (`detect_schemas`, `detect_many`) require a Tokio
//! runtime. `detect_schemas_in_markup` is synchronous.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod parse;
mod run;
pub mod schema;
pub mod server;
pub mod storage;
mod utils;

// Re-export public API
pub use app::{collect_urls, read_url_lines, validate_and_normalize_url};
pub use config::{Cli, Command, FetchConfig, LogFormat, LogLevel, PipelineOptions};
pub use error_handling::{DatabaseError, FetchError, InitializationError};
pub use fetch::{Fetcher, HttpFetcher, StaticMarkup};
pub use parse::{FieldValue, SourceFormat, StructuredRecord};
pub use run::{run_detect, run_serve, DetectSummary};
pub use schema::{
    detect_many, detect_schemas, detect_schemas_in_markup, SchemaReport, ValidationResult,
};
pub use storage::{run_migrations, SchemaStore};
