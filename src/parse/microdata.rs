//! Microdata extraction.
//!
//! Implements the HTML item model: top-level items are `itemscope` elements
//! that are not themselves a property of another item. Properties are read from
//! descendants (and `itemref` targets) whose nearest scope is the item.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::record::{last_path_segment, FieldValue, SourceFormat, StructuredRecord};
use crate::utils::parse_selector_with_fallback;

/// Nested item depth beyond which nested items are left empty.
const MAX_ITEM_DEPTH: usize = 16;

/// Property values read per document before extraction stops.
///
/// `itemref` lets one element be a property of many items, so output can grow
/// much faster than the markup; this bounds it.
const MAX_PROPERTY_VALUES: usize = 4096;

static ITEMSCOPE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[itemscope]", "Microdata extraction"));

static ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[id]", "Microdata itemref lookup"));

/// Extracts one record per top-level Microdata item, in document order.
///
/// URL-valued properties are resolved against `base_url` when one is given.
pub fn extract_microdata(document: &Html, base_url: Option<&Url>) -> Vec<StructuredRecord> {
    let ctx = ItemContext::new(document, base_url);

    let records: Vec<StructuredRecord> = document
        .select(&ITEMSCOPE_SELECTOR)
        .filter(|el| el.value().attr("itemprop").is_none())
        .map(|el| {
            let mut record = StructuredRecord::new(item_type(el), SourceFormat::Microdata);
            record.fields = ctx.item_properties(el, &mut Vec::new());
            record
        })
        .collect();

    if ctx.remaining.get() == 0 {
        debug!("Microdata property limit ({MAX_PROPERTY_VALUES}) reached; output truncated");
    }
    records
}

/// Declared type: last path segment of the first `itemtype` token.
fn item_type(el: ElementRef<'_>) -> Option<String> {
    el.value()
        .attr("itemtype")
        .and_then(|t| t.split_whitespace().next())
        .and_then(last_path_segment)
}

struct ItemContext<'a> {
    ids: HashMap<&'a str, ElementRef<'a>>,
    base_url: Option<&'a Url>,
    remaining: Cell<usize>,
}

impl<'a> ItemContext<'a> {
    fn new(document: &'a Html, base_url: Option<&'a Url>) -> Self {
        let mut ids = HashMap::new();
        for el in document.select(&ID_SELECTOR) {
            if let Some(id) = el.value().attr("id") {
                // First element with a given id wins
                ids.entry(id).or_insert(el);
            }
        }
        Self {
            ids,
            base_url,
            remaining: Cell::new(MAX_PROPERTY_VALUES),
        }
    }

    /// Collects an item's properties, collapsing single values to scalars.
    ///
    /// `path` holds the items and `itemref` targets currently being crawled;
    /// anything already on it is skipped.
    fn item_properties(
        &self,
        item: ElementRef<'a>,
        path: &mut Vec<ElementRef<'a>>,
    ) -> BTreeMap<String, FieldValue> {
        let mut values: Vec<(String, FieldValue)> = Vec::new();
        path.push(item);

        for child in item.children().filter_map(ElementRef::wrap) {
            self.crawl(child, path, &mut values);
        }
        if let Some(refs) = item.value().attr("itemref") {
            for id in refs.split_whitespace() {
                let Some(target) = self.ids.get(id) else {
                    continue;
                };
                if path.contains(target) {
                    continue;
                }
                path.push(*target);
                self.crawl(*target, path, &mut values);
                path.pop();
            }
        }

        path.pop();

        let mut grouped: BTreeMap<String, Vec<FieldValue>> = BTreeMap::new();
        for (name, value) in values {
            grouped.entry(name).or_default().push(value);
        }
        grouped
            .into_iter()
            .map(|(name, vals)| (name, FieldValue::collapse(vals)))
            .collect()
    }

    fn crawl(
        &self,
        el: ElementRef<'a>,
        path: &mut Vec<ElementRef<'a>>,
        out: &mut Vec<(String, FieldValue)>,
    ) {
        if self.remaining.get() == 0 {
            return;
        }

        if let Some(names) = el.value().attr("itemprop") {
            self.remaining.set(self.remaining.get() - 1);
            let value = self.property_value(el, path);
            for name in names.split_whitespace() {
                out.push((name.to_string(), value.clone()));
            }
        }

        // Properties below a nested scope belong to that scope
        if el.value().attr("itemscope").is_some() {
            return;
        }
        for child in el.children().filter_map(ElementRef::wrap) {
            self.crawl(child, path, out);
        }
    }

    fn property_value(
        &self,
        el: ElementRef<'a>,
        path: &mut Vec<ElementRef<'a>>,
    ) -> FieldValue {
        let element = el.value();

        if element.attr("itemscope").is_some() {
            let mut map = if path.contains(&el) || path.len() >= MAX_ITEM_DEPTH {
                BTreeMap::new()
            } else {
                self.item_properties(el, path)
            };
            if let Some(t) = item_type(el) {
                map.insert("@type".to_string(), FieldValue::Text(t));
            }
            return FieldValue::Map(map);
        }

        let text = match element.name() {
            "meta" => attr_or_empty(el, "content"),
            "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => {
                self.url_attr(el, "src")
            }
            "a" | "area" | "link" => self.url_attr(el, "href"),
            "object" => self.url_attr(el, "data"),
            "data" | "meter" => attr_or_empty(el, "value"),
            "time" => match element.attr("datetime") {
                Some(dt) => dt.to_string(),
                None => text_content(el),
            },
            _ => text_content(el),
        };
        FieldValue::Text(text)
    }

    fn url_attr(&self, el: ElementRef<'a>, attr: &str) -> String {
        let raw = attr_or_empty(el, attr);
        if raw.is_empty() {
            return raw;
        }
        match self.base_url.and_then(|base| base.join(&raw).ok()) {
            Some(resolved) => resolved.to_string(),
            None => raw,
        }
    }
}

fn attr_or_empty(el: ElementRef<'_>, attr: &str) -> String {
    el.value().attr(attr).unwrap_or("").trim().to_string()
}

fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
