//! Report aggregation.
//!
//! Folds validation results into the summary/details report returned at the
//! system boundary. `details` keeps first-seen group order, so it is stored as
//! an ordered list of groups and serialized as a JSON object.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::validate::{validate_record, ValidationResult};
use crate::config::{
    PipelineOptions, MESSAGE_DETECTED, MESSAGE_DETECTION_ERROR, MESSAGE_NONE_DETECTED,
    UNKNOWN_TYPE_LABEL,
};
use crate::parse::StructuredRecord;

/// Validation results grouped by type label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGroups(Vec<(String, Vec<ValidationResult>)>);

impl TypeGroups {
    /// Groups results by declared type ("Unknown" when absent), preserving order.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ValidationResult>,
    {
        let mut groups: Vec<(String, Vec<ValidationResult>)> = Vec::new();
        for result in results {
            let label = result
                .declared_type
                .as_deref()
                .unwrap_or(UNKNOWN_TYPE_LABEL);
            match groups.iter_mut().find(|(l, _)| l == label) {
                Some((_, members)) => members.push(result.clone()),
                None => groups.push((label.to_string(), vec![result.clone()])),
            }
        }
        Self(groups)
    }

    /// Members of the group with `label`.
    pub fn get(&self, label: &str) -> Option<&[ValidationResult]> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, members)| members.as_slice())
    }

    /// Group labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no groups.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TypeGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, members) in &self.0 {
            map.serialize_entry(label, members)?;
        }
        map.end()
    }
}

/// The `schemas` block of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schemas {
    /// One result per record, in extraction order
    pub summary: Vec<ValidationResult>,
    /// Results grouped by type label
    pub details: TypeGroups,
    /// Normalised records, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<StructuredRecord>>,
}

/// Final output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaReport {
    /// Inspected URL
    pub url: String,
    /// Detection outcome message
    pub message: String,
    /// `None` when logo discovery is off (key omitted); `Some(None)` serializes as `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Option<String>>,
    /// Validation results
    pub schemas: Schemas,
}

impl SchemaReport {
    /// Builds a report from extracted records.
    ///
    /// Records whose declared type is in the exclusion list are dropped before
    /// validation and grouping. `logo` is only emitted when logo discovery is on.
    pub fn from_records(
        url: &str,
        records: Vec<StructuredRecord>,
        logo: Option<String>,
        options: &PipelineOptions,
    ) -> Self {
        let records = exclude_types(records, options);
        let summary: Vec<ValidationResult> = records.iter().map(validate_record).collect();
        let details = TypeGroups::from_results(&summary);
        let message = if summary.is_empty() {
            MESSAGE_NONE_DETECTED
        } else {
            MESSAGE_DETECTED
        };

        Self {
            url: url.to_string(),
            message: message.to_string(),
            logo: options.include_logo_discovery.then_some(logo),
            schemas: Schemas {
                summary,
                details,
                raw: options.include_raw_schema.then_some(records),
            },
        }
    }

    /// The degenerate report returned when the page could not be fetched.
    pub fn detection_error(url: &str, options: &PipelineOptions) -> Self {
        Self {
            url: url.to_string(),
            message: MESSAGE_DETECTION_ERROR.to_string(),
            logo: options.include_logo_discovery.then_some(None),
            schemas: Schemas {
                summary: Vec::new(),
                details: TypeGroups::default(),
                raw: options.include_raw_schema.then(Vec::new),
            },
        }
    }

    /// Discovered logo URL, if any.
    pub fn logo_url(&self) -> Option<&str> {
        self.logo.as_ref().and_then(|l| l.as_deref())
    }

    /// True for the fetch-failure report.
    pub fn is_detection_error(&self) -> bool {
        self.message == MESSAGE_DETECTION_ERROR
    }
}

/// Drops records whose declared type is excluded.
pub fn exclude_types(
    records: Vec<StructuredRecord>,
    options: &PipelineOptions,
) -> Vec<StructuredRecord> {
    if options.excluded_types.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| !options.is_excluded(r.declared_type.as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{FieldValue, SourceFormat};

    fn record(declared_type: Option<&str>) -> StructuredRecord {
        StructuredRecord::new(declared_type.map(str::to_string), SourceFormat::JsonLd)
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let records = vec![
            record(Some("Product")),
            record(Some("Article")),
            record(Some("Product")),
            record(None),
        ];
        let report = SchemaReport::from_records("https://x.test", records, None, &PipelineOptions::default());
        let labels: Vec<&str> = report.schemas.details.labels().collect();
        assert_eq!(labels, vec!["Product", "Article", "Unknown"]);
        assert_eq!(report.schemas.details.get("Product").map(|g| g.len()), Some(2));
        assert_eq!(report.message, MESSAGE_DETECTED);
    }

    #[test]
    fn test_details_serialize_in_insertion_order() {
        let records = vec![record(Some("Zebra")), record(Some("Apple"))];
        let report = SchemaReport::from_records("u", records, None, &PipelineOptions::default());
        let json = serde_json::to_string(&report.schemas.details).unwrap();
        let zebra = json.find("Zebra").unwrap();
        let apple = json.find("Apple").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn test_empty_report() {
        let report = SchemaReport::from_records("u", Vec::new(), None, &PipelineOptions::default());
        assert_eq!(report.message, MESSAGE_NONE_DETECTED);
        assert!(report.schemas.summary.is_empty());
        assert!(report.schemas.details.is_empty());
        assert!(!report.is_detection_error());
    }

    #[test]
    fn test_exclusion_removes_from_summary_and_details() {
        let options = PipelineOptions {
            excluded_types: vec!["StructuredData".to_string()],
            ..Default::default()
        };
        let records = vec![record(Some("StructuredData")), record(Some("Person"))];
        let report = SchemaReport::from_records("u", records, None, &options);
        assert_eq!(report.schemas.summary.len(), 1);
        assert!(report.schemas.details.get("StructuredData").is_none());
    }

    #[test]
    fn test_excluding_everything_reads_as_no_data() {
        let options = PipelineOptions {
            excluded_types: vec!["Person".to_string()],
            ..Default::default()
        };
        let report = SchemaReport::from_records("u", vec![record(Some("Person"))], None, &options);
        assert_eq!(report.message, MESSAGE_NONE_DETECTED);
    }

    #[test]
    fn test_logo_key_follows_option() {
        let with_logo = SchemaReport::from_records("u", Vec::new(), None, &PipelineOptions::default());
        let json = serde_json::to_value(&with_logo).unwrap();
        assert_eq!(json.get("logo"), Some(&serde_json::Value::Null));

        let options = PipelineOptions {
            include_logo_discovery: false,
            ..Default::default()
        };
        let without = SchemaReport::from_records("u", Vec::new(), Some("ignored".into()), &options);
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("logo").is_none());
        assert_eq!(without.logo_url(), None);
    }

    #[test]
    fn test_raw_records_included_on_request() {
        let options = PipelineOptions {
            include_raw_schema: true,
            ..Default::default()
        };
        let mut rec = record(Some("Person"));
        rec.fields
            .insert("name".to_string(), FieldValue::Text("Ada".to_string()));
        let report = SchemaReport::from_records("u", vec![rec], None, &options);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schemas"]["raw"][0]["fields"]["name"], "Ada");
        assert_eq!(json["schemas"]["raw"][0]["format"], "JSON-LD");
        assert_eq!(json["schemas"]["raw"][0]["context"], "https://schema.org");
    }

    #[test]
    fn test_detection_error_report() {
        let report = SchemaReport::detection_error("https://down.test", &PipelineOptions::default());
        assert!(report.is_detection_error());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://down.test",
                "message": "Error occurred during schema detection",
                "logo": null,
                "schemas": {"summary": [], "details": {}}
            })
        );
    }
}
