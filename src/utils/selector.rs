//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`), so an extractor with a bad selector yields no records instead
/// of panicking.
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Where the selector is used, for the error log (e.g., "JSON-LD extraction")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").expect("fallback selector '*:not(*)' always parses")
    })
}
