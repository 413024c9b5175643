//! Title, text and link extraction from raw HTML.

use scraper::{Html, Selector};

use crate::{Result, SearchError, SearchResult};

/// Title used when a page has none.
pub const NO_TITLE: &str = "No Title";

/// Elements whose text is never part of the visible page text.
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Content extracted from one HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Text of the `<title>` element, if non-empty.
    pub title: Option<String>,
    /// Visible text, whitespace-collapsed.
    pub text: String,
    /// `href` of every anchor, in document order.
    pub links: Vec<String>,
}

/// Extracts title, visible text and links from `raw`.
pub fn parse_page(raw: &str) -> Result<Page> {
    let document = Html::parse_document(raw);

    let title_selector = Selector::parse("title")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let link_selector = Selector::parse("a[href]")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let links = document
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::to_string)
        .collect();

    Ok(Page {
        title,
        text: visible_text(&document),
        links,
    })
}

/// Parses `raw` into a single result for `url`, with links and a
/// fallback title.
pub fn parse_html(raw: &str, url: &str) -> Result<SearchResult> {
    let page = parse_page(raw)?;
    let title = page.title.unwrap_or_else(|| NO_TITLE.to_string());
    Ok(SearchResult::new(url, title, page.text).with_links(page.links))
}

fn visible_text(document: &Html) -> String {
    let mut words = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
