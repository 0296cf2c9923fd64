//! Normalised structured-data records.
//!
//! Every extractor, whatever its source encoding, produces `StructuredRecord`s.
//! Field values use the closed `FieldValue` variant instead of raw JSON so that
//! presence checks and logo lookups stay typed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::{SCHEMA_ORG_CONTEXT, UNKNOWN_TYPE_LABEL};

/// Encoding a record was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceFormat {
    /// `<script type="application/ld+json">` blocks
    #[serde(rename = "JSON-LD")]
    JsonLd,
    /// `itemscope` / `itemprop` attributes
    #[serde(rename = "Microdata")]
    Microdata,
    /// `typeof` / `rdf:type` assertions
    #[serde(rename = "RDFa")]
    Rdfa,
}

impl SourceFormat {
    /// Label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::JsonLd => "JSON-LD",
            SourceFormat::Microdata => "Microdata",
            SourceFormat::Rdfa => "RDFa",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured-data property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String value
    Text(String),
    /// Numeric value, kept lossless
    Number(serde_json::Number),
    /// Boolean value
    Bool(bool),
    /// Nested object (nested JSON-LD node or nested Microdata item)
    Map(BTreeMap<String, FieldValue>),
    /// Multi-valued property
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Converts a JSON value, dropping `null`s at every level.
    ///
    /// Returns `None` for a top-level `null`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::List(
                items.iter().filter_map(FieldValue::from_json).collect(),
            )),
            Value::Object(map) => Some(FieldValue::Map(
                map.iter()
                    .filter_map(|(k, v)| FieldValue::from_json(v).map(|fv| (k.clone(), fv)))
                    .collect(),
            )),
        }
    }

    /// Collapses a property's value list: one value becomes a scalar, several stay a list.
    pub fn collapse(mut values: Vec<FieldValue>) -> Self {
        if values.len() == 1 {
            values.remove(0)
        } else {
            FieldValue::List(values)
        }
    }

    /// Returns the string if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a key if this is a `Map` value.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Map(map) => map.get(key),
            _ => None,
        }
    }
}

/// One structured-data item, normalised across encodings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredRecord {
    /// Declared semantic type (`@type`, last segment of `itemtype`, or of an `rdf:type` object)
    #[serde(rename = "type")]
    pub declared_type: Option<String>,
    /// Vocabulary identifier, never empty after normalisation
    pub context: String,
    /// Extractor that produced the record
    #[serde(rename = "format")]
    pub source_format: SourceFormat,
    /// Property bag
    pub fields: BTreeMap<String, FieldValue>,
}

impl StructuredRecord {
    /// Creates a record with the canonical context and no fields.
    pub fn new(declared_type: Option<String>, source_format: SourceFormat) -> Self {
        Self {
            declared_type,
            context: SCHEMA_ORG_CONTEXT.to_string(),
            source_format,
            fields: BTreeMap::new(),
        }
    }

    /// Returns true if `name` is present in the property bag.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the value of `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Group label: the declared type, or "Unknown".
    pub fn type_label(&self) -> &str {
        self.declared_type.as_deref().unwrap_or(UNKNOWN_TYPE_LABEL)
    }
}

/// Normalises a JSON-LD `@context` value to a vocabulary identifier.
///
/// `http(s)://schema.org` with or without a trailing slash maps to the canonical
/// `https://schema.org`. Other strings are kept as-is. For arrays the first
/// string entry is used. Anything else, including absence, yields the canonical
/// identifier.
pub fn normalize_context(context: Option<&Value>) -> String {
    let raw = match context {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(items)) => items.iter().find_map(Value::as_str),
        _ => None,
    };

    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => {
            let stripped = s.trim_end_matches('/');
            if stripped.eq_ignore_ascii_case("http://schema.org")
                || stripped.eq_ignore_ascii_case("https://schema.org")
            {
                SCHEMA_ORG_CONTEXT.to_string()
            } else {
                s.to_string()
            }
        }
        _ => SCHEMA_ORG_CONTEXT.to_string(),
    }
}

/// Returns the last path segment of a type IRI.
///
/// Takes the text after the final `/` (ignoring a trailing slash), then the
/// text after a `#` if one remains: `https://schema.org/Product` gives
/// `Product`, `http://www.w3.org/2006/vcard/ns#Organization` gives
/// `Organization`. Returns `None` when nothing is left.
pub fn last_path_segment(iri: &str) -> Option<String> {
    let trimmed = iri.trim().trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let segment = segment.rsplit('#').next().unwrap_or(segment);
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}
