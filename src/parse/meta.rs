//! Meta tag extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::utils::parse_selector_with_fallback;

static OG_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback(r#"meta[property="og:image"]"#, "Open Graph image")
});

/// Returns the first non-empty `<meta property="og:image">` content.
pub fn extract_og_image(document: &Html) -> Option<String> {
    document
        .select(&OG_IMAGE_SELECTOR)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}
