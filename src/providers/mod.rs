//! Search provider implementations.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Result, SearchError, SearchResult};

// Hosted search APIs
mod bing;
mod searxng;
mod serper;
mod tavily;

// Crawl services
mod crawl4ai;
mod firecrawl;

// Local page extraction
#[cfg(feature = "headless")]
mod headless;
mod html_parse;
mod spider;

pub use bing::Bing;
pub use searxng::Searxng;
pub use serper::Serper;
pub use tavily::Tavily;

pub use crawl4ai::Crawl4Ai;
pub use firecrawl::Firecrawl;

#[cfg(feature = "headless")]
pub use headless::Headless;
pub use html_parse::HtmlParse;
pub use spider::Spider;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; search-relay/0.3)";

/// Builds the HTTP client shared by the API-backed providers.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Interprets a query as the page to crawl.
pub(crate) fn target_url(query: &str) -> Result<Url> {
    let url = Url::parse(query.trim())
        .map_err(|e| SearchError::InvalidQuery(format!("expected a URL, got '{}': {}", query, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(SearchError::InvalidQuery(format!(
            "unsupported URL scheme '{}'",
            scheme
        ))),
    }
}

/// Wraps a crawl service's JSON answer as a single result, lifting the
/// commonly named fields and keeping the full payload in `raw`.
pub(crate) fn crawl_record(url: &Url, raw: serde_json::Value) -> SearchResult {
    let title = first_str(&raw, &["/title", "/metadata/title", "/data/metadata/title"]);
    let content = first_str(
        &raw,
        &["/markdown", "/text", "/content", "/data/markdown", "/data/content"],
    );
    let links = ["/links", "/data/links"]
        .iter()
        .find_map(|pointer| raw.pointer(pointer).and_then(|v| v.as_array()))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    SearchResult::new(url.as_str(), title, content)
        .with_links(links)
        .with_raw(raw)
}

fn first_str(value: &serde_json::Value, pointers: &[&str]) -> String {
    pointers
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string()
}
