// src/crawl/page.rs
// =============================================================================
// Reads the two things the crawler needs out of a rendered HTML page:
// - the visible text nodes (for keyword extraction)
// - the raw href targets of every <a> tag (for link discovery)
//
// We use the `scraper` crate (built on html5ever) to parse the HTML.
//
// Rust concepts:
// - Iterators: filter_map walks the document tree lazily
// - Lazy statics: the CSS selector is parsed once
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Elements whose contents are code, not prose. Title and noscript text stay.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Text and links pulled out of one page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub text_nodes: Vec<String>,
    pub hrefs: Vec<String>,
}

// Parses a page once and reads both text and links from it
//
// The parsed document never leaves this function, so callers only hold
// plain Strings across await points.
pub fn parse_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);
    PageContent {
        text_nodes: text_nodes(&document),
        hrefs: hyperlinks(&document),
    }
}

// Collects every non-blank visible text node, trimmed
pub fn text_nodes(document: &Html) -> Vec<String> {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|element| HIDDEN_ELEMENTS.contains(&element.name()));
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

// Collects the raw href attribute of every <a href> element
pub fn hyperlinks(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}
