//! JSON-LD extraction.
//!
//! Reads `<script type="application/ld+json">` blocks in document order. A
//! block that is not valid JSON is skipped. `@graph` containers and top-level
//! arrays are expanded into one record per node.

use std::sync::LazyLock;

use log::debug;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

use super::record::{normalize_context, FieldValue, SourceFormat, StructuredRecord};
use crate::utils::parse_selector_with_fallback;

const JSON_LD_MIME: &str = "application/ld+json";

// Type attribute is compared case-insensitively below, so select every typed script
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("script[type]", "JSON-LD extraction"));

/// Extracts JSON-LD records from a parsed document.
pub fn extract_json_ld(document: &Html) -> Vec<StructuredRecord> {
    let mut records = Vec::new();

    for script in document.select(&SCRIPT_SELECTOR) {
        let is_json_ld = script
            .value()
            .attr("type")
            .map(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME))
            .unwrap_or(false);
        if !is_json_ld {
            continue;
        }

        let text: String = script.text().collect();
        match parse_block(&text) {
            Some(value) => collect_nodes(&value, None, &mut records),
            None => debug!("Skipping malformed JSON-LD block ({} bytes)", text.len()),
        }
    }

    records
}

/// Parses one script body. Any parse failure yields `None`.
fn parse_block(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

/// Walks a parsed block, pushing one record per node.
///
/// `inherited_context` is the `@context` of the enclosing `@graph` container,
/// applied to nodes that carry none of their own.
fn collect_nodes(value: &Value, inherited_context: Option<&Value>, out: &mut Vec<StructuredRecord>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_nodes(item, inherited_context, out);
            }
        }
        Value::Object(map) => match map.get("@graph") {
            Some(graph @ (Value::Array(_) | Value::Object(_))) => {
                let context = map.get("@context").or(inherited_context);
                collect_nodes(graph, context, out);
            }
            _ => out.push(record_from_node(map, inherited_context)),
        },
        // Scalars carry no structured data
        _ => {}
    }
}

fn record_from_node(node: &Map<String, Value>, inherited_context: Option<&Value>) -> StructuredRecord {
    let context = normalize_context(node.get("@context").or(inherited_context));

    let fields = node
        .iter()
        .filter(|(key, _)| key.as_str() != "@context" && key.as_str() != "@type")
        .filter_map(|(key, value)| FieldValue::from_json(value).map(|fv| (key.clone(), fv)))
        .collect();

    StructuredRecord {
        declared_type: declared_type(node.get("@type")),
        context,
        source_format: SourceFormat::JsonLd,
        fields,
    }
}

/// `@type` as a string, or the first string of an array.
fn declared_type(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.iter().find_map(Value::as_str),
        _ => None,
    }?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
