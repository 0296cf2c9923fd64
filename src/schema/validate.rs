//! Type-specific required-field validation.

use serde::Serialize;

use crate::parse::{SourceFormat, StructuredRecord};

/// Required fields per declared type, checked in listed order.
///
/// Types not listed have no required fields.
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("Article", &["headline"]),
    ("Product", &["name", "offers"]),
    ("Event", &["name", "startDate"]),
    ("Person", &["name"]),
];

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Declared type of the record
    #[serde(rename = "type")]
    pub declared_type: Option<String>,
    /// Extractor that produced the record
    #[serde(rename = "format")]
    pub source_format: SourceFormat,
    /// Whether every rule passed
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    /// First failed rule, present iff `is_valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Required fields for `declared_type`; empty for unlisted types.
pub fn required_fields(declared_type: &str) -> &'static [&'static str] {
    REQUIRED_FIELDS
        .iter()
        .find(|(t, _)| *t == declared_type)
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}

/// Validates a record. Only the first failure is reported.
///
/// RDFa records carry no properties, so only the type check applies to them.
pub fn validate_record(record: &StructuredRecord) -> ValidationResult {
    let error = match record.declared_type.as_deref() {
        None => Some("Missing '@type'".to_string()),
        Some(_) if record.source_format == SourceFormat::Rdfa => None,
        Some(declared) => required_fields(declared)
            .iter()
            .find(|field| !record.has_field(field))
            .map(|field| format!("{declared} is missing required field '{field}'")),
    };

    ValidationResult {
        declared_type: record.declared_type.clone(),
        source_format: record.source_format,
        is_valid: error.is_none(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::FieldValue;

    fn record(declared_type: Option<&str>, fields: &[&str]) -> StructuredRecord {
        let mut record = StructuredRecord::new(declared_type.map(str::to_string), SourceFormat::JsonLd);
        for f in fields {
            record
                .fields
                .insert(f.to_string(), FieldValue::Text("x".to_string()));
        }
        record
    }

    #[test]
    fn test_missing_type() {
        let result = validate_record(&record(None, &["name"]));
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("Missing '@type'"));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let result = validate_record(&record(Some("Product"), &[]));
        assert_eq!(
            result.error.as_deref(),
            Some("Product is missing required field 'name'")
        );

        let result = validate_record(&record(Some("Product"), &["name"]));
        assert_eq!(
            result.error.as_deref(),
            Some("Product is missing required field 'offers'")
        );
    }

    #[test]
    fn test_each_table_entry_reports_first_field() {
        for (declared, fields) in REQUIRED_FIELDS {
            let result = validate_record(&record(Some(*declared), &[]));
            assert!(!result.is_valid);
            assert_eq!(
                result.error,
                Some(format!("{declared} is missing required field '{}'", fields[0]))
            );
        }
    }

    #[test]
    fn test_complete_records_are_valid() {
        assert!(validate_record(&record(Some("Article"), &["headline"])).is_valid);
        assert!(validate_record(&record(Some("Event"), &["name", "startDate"])).is_valid);
        assert!(validate_record(&record(Some("Person"), &["name"])).is_valid);
        let product = validate_record(&record(Some("Product"), &["name", "offers"]));
        assert!(product.is_valid);
        assert_eq!(product.error, None);
    }

    #[test]
    fn test_rdfa_records_skip_required_fields() {
        let event = StructuredRecord::new(Some("Event".to_string()), SourceFormat::Rdfa);
        let result = validate_record(&event);
        assert!(result.is_valid);
        assert_eq!(result.error, None);

        let untyped = StructuredRecord::new(None, SourceFormat::Rdfa);
        assert_eq!(
            validate_record(&untyped).error.as_deref(),
            Some("Missing '@type'")
        );

        let microdata = StructuredRecord::new(Some("Event".to_string()), SourceFormat::Microdata);
        assert!(!validate_record(&microdata).is_valid);
    }

    #[test]
    fn test_unknown_type_passes() {
        let result = validate_record(&record(Some("Recipe"), &[]));
        assert!(result.is_valid);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        assert!(validate_record(&record(Some("product"), &[])).is_valid);
    }

    #[test]
    fn test_serialization_shape() {
        let invalid = validate_record(&record(Some("Person"), &[]));
        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Person",
                "format": "JSON-LD",
                "isValid": false,
                "error": "Person is missing required field 'name'"
            })
        );

        let valid = validate_record(&record(Some("Person"), &["name"]));
        let json = serde_json::to_value(&valid).unwrap();
        assert!(json.get("error").is_none());
    }
}
