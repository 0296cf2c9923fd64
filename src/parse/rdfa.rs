//! RDFa type extraction.
//!
//! Only `rdf:type` assertions are read: `typeof` terms, plus `rel`/`property`
//! values that expand to `rdf:type` with a `resource`, `href` or `src` object.
//! Terms are expanded through the nearest `vocab`, in-scope `prefix`
//! declarations and the RDFa initial-context prefixes.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html};
use url::Url;

use super::record::{last_path_segment, SourceFormat, StructuredRecord};
use crate::config::RDF_TYPE_IRI;

/// Prefixes predeclared by the RDFa 1.1 initial context.
const INITIAL_PREFIXES: &[(&str, &str)] = &[
    ("as", "https://www.w3.org/ns/activitystreams#"),
    ("cc", "http://creativecommons.org/ns#"),
    ("dc", "http://purl.org/dc/terms/"),
    ("dc11", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("gr", "http://purl.org/goodrelations/v1#"),
    ("ical", "http://www.w3.org/2002/12/cal/icaltzd#"),
    ("og", "http://ogp.me/ns#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfa", "http://www.w3.org/ns/rdfa#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("schema", "http://schema.org/"),
    ("sioc", "http://rdfs.org/sioc/ns#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("v", "http://rdf.data-vocabulary.org/#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("void", "http://rdfs.org/ns/void#"),
    ("xhv", "http://www.w3.org/1999/xhtml/vocab#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

// `prefix="og: http://ogp.me/ns# foaf: http://xmlns.com/foaf/0.1/"`
static PREFIX_PAIR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_][\w.-]*):\s+(\S+)")
        .map_err(|e| log::error!("Failed to compile RDFa prefix pattern: {e}"))
        .ok()
});

/// Extracts one minimal record per `rdf:type` assertion, in document order.
///
/// Records carry only the declared type (last path segment of the type IRI)
/// and the canonical context; no other properties are read.
pub fn extract_rdfa(document: &Html, base_url: Option<&Url>) -> Vec<StructuredRecord> {
    extract_rdf_type_iris(document, base_url)
        .iter()
        .map(|iri| StructuredRecord::new(last_path_segment(iri), SourceFormat::Rdfa))
        .collect()
}

/// Returns the object IRI of every `rdf:type` triple, in document order.
pub fn extract_rdf_type_iris(document: &Html, base_url: Option<&Url>) -> Vec<String> {
    let mut scope = Scope {
        vocab: None,
        prefixes: INITIAL_PREFIXES
            .iter()
            .map(|(p, ns)| (p.to_string(), ns.to_string()))
            .collect(),
        base_url,
    };
    let mut out = Vec::new();
    walk(document.root_element(), &mut scope, &mut out);
    out
}

struct Scope<'a> {
    vocab: Option<String>,
    prefixes: HashMap<String, String>,
    base_url: Option<&'a Url>,
}

impl Scope<'_> {
    /// Expands a CURIE, absolute IRI or vocab term. Blank nodes and
    /// unresolvable terms yield `None`.
    fn expand(&self, token: &str) -> Option<String> {
        if token.contains(':') || token.starts_with('[') {
            return self.expand_curie(token);
        }
        self.vocab.as_ref().map(|vocab| format!("{vocab}{token}"))
    }

    /// Expands a (safe) CURIE through the in-scope prefixes, or accepts an
    /// absolute IRI. Anything else yields `None`.
    fn expand_curie(&self, token: &str) -> Option<String> {
        let token = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(token);
        let (prefix, reference) = token.split_once(':')?;
        if prefix == "_" {
            return None;
        }
        if let Some(ns) = self.prefixes.get(&prefix.to_ascii_lowercase()) {
            return Some(format!("{ns}{reference}"));
        }
        is_absolute_iri(prefix, reference).then(|| token.to_string())
    }

    fn resolve(&self, raw: &str) -> String {
        match self.base_url.and_then(|base| base.join(raw).ok()) {
            Some(resolved) => resolved.to_string(),
            None => raw.to_string(),
        }
    }

    /// Object of an `rdf:type` assertion: `resource` may be a CURIE, while
    /// `href` and `src` are always IRIs.
    fn type_object(&self, element: &Element) -> Option<String> {
        let non_empty = |attr: &str| element.attr(attr).map(str::trim).filter(|v| !v.is_empty());

        if let Some(resource) = non_empty("resource") {
            let curie = if resource.contains(':') {
                self.expand_curie(resource)
            } else {
                None
            };
            return Some(curie.unwrap_or_else(|| self.resolve(resource)));
        }
        ["href", "src"]
            .iter()
            .find_map(|attr| non_empty(attr))
            .map(|iri| self.resolve(iri))
    }
}

/// An unknown prefix is only an IRI scheme when the rest is hierarchical or
/// the scheme is a well-known one.
fn is_absolute_iri(scheme: &str, rest: &str) -> bool {
    let known = ["http", "https", "urn"]
        .iter()
        .any(|s| scheme.eq_ignore_ascii_case(s));
    (known || rest.starts_with("//")) && Url::parse(&format!("{scheme}:{rest}")).is_ok()
}

fn walk(el: ElementRef<'_>, scope: &mut Scope<'_>, out: &mut Vec<String>) {
    let element = el.value();

    let saved_vocab = scope.vocab.clone();
    let mut shadowed: Vec<(String, Option<String>)> = Vec::new();

    if let Some(vocab) = element.attr("vocab") {
        let vocab = vocab.trim();
        scope.vocab = if vocab.is_empty() {
            None
        } else {
            Some(scope.resolve(vocab))
        };
    }
    if let (Some(decl), Some(re)) = (element.attr("prefix"), PREFIX_PAIR.as_ref()) {
        for cap in re.captures_iter(decl) {
            let prefix = cap[1].to_ascii_lowercase();
            let previous = scope.prefixes.insert(prefix.clone(), cap[2].to_string());
            shadowed.push((prefix, previous));
        }
    }

    if let Some(types) = element.attr("typeof") {
        out.extend(types.split_whitespace().filter_map(|t| scope.expand(t)));
    }

    let asserts_type = ["rel", "property"].iter().any(|attr| {
        element
            .attr(attr)
            .map(|v| {
                v.split_whitespace()
                    .any(|t| scope.expand(t).as_deref() == Some(RDF_TYPE_IRI))
            })
            .unwrap_or(false)
    });
    if asserts_type {
        if let Some(iri) = scope.type_object(element) {
            out.push(iri);
        }
    }

    for child in el.children().filter_map(ElementRef::wrap) {
        walk(child, scope, out);
    }

    scope.vocab = saved_vocab;
    for (prefix, previous) in shadowed.into_iter().rev() {
        match previous {
            Some(ns) => scope.prefixes.insert(prefix, ns),
            None => scope.prefixes.remove(&prefix),
        };
    }
}
