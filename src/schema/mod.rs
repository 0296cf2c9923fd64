//! Structured-data validation and reporting.
//!
//! This module turns extracted records into the report returned to callers:
//! - Required-field validation per declared type
//! - Grouping into summary/details with an exclusion list
//! - Optional logo discovery
//! - The pipeline entry points tying fetch, extraction and reporting together

mod logo;
mod pipeline;
mod report;
mod validate;

// Re-export public API
pub use logo::{discover_logo, logo_from_records};
pub use pipeline::{detect_many, detect_schemas, detect_schemas_in_markup};
pub use report::{exclude_types, SchemaReport, Schemas, TypeGroups};
pub use validate::{required_fields, validate_record, ValidationResult};
