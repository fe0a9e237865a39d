// src/crawl/links.rs
// =============================================================================
// Extracts link targets from an HTML page.
//
// We use the `scraper` crate (built on html5ever) and the CSS selector
// "a[href]" to walk every anchor that has an href attribute.
//
// The href values are returned exactly as written in the page, in document
// order. Relative links are NOT resolved
// against the page URL; the classifier rejects anything that isn't an
// absolute http(s) URL.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::OnceLock;

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    // "a[href]" is a constant, known-valid selector
    SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"))
}

// Returns the raw href of every <a href="..."> in `html`, in document order.
//
// scraper's Html is not Send, so the document is parsed and dropped inside
// this function and only the owned strings cross an .await in the caller.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
