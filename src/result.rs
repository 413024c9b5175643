//! Search result types.

use serde::{Deserialize, Serialize};

/// A single result record.
///
/// The populated fields depend on the backend: search APIs fill `content`
/// with a snippet, crawlers fill it with page text and may add `links`,
/// `html`, or the backend's own JSON in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Snippet or extracted page text.
    #[serde(default)]
    pub content: String,
    /// Hyperlinks found on the page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// Rendered page HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Backend response passed through unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Sets the extracted links.
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    /// Sets the rendered HTML.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Attaches the raw backend payload.
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// Ordered result list returned by every provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a response from an ordered list of results.
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        Self { results }
    }

    /// Appends a result.
    pub fn add_result(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    /// Returns the results.
    pub fn items(&self) -> &[SearchResult] {
        &self.results
    }

    /// Consumes the response, returning its results.
    pub fn into_items(self) -> Vec<SearchResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl From<Vec<SearchResult>> for SearchResponse {
    fn from(results: Vec<SearchResult>) -> Self {
        Self::from_results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("https://example.com", "Title", "Content");
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.title, "Title");
        assert_eq!(result.content, "Content");
        assert!(result.links.is_empty());
        assert!(result.html.is_none());
        assert!(result.raw.is_none());
    }

    #[test]
    fn test_search_result_builders() {
        let result = SearchResult::new("url", "title", "")
            .with_links(vec!["https://a.example".to_string()])
            .with_html("<html></html>")
            .with_raw(serde_json::json!({"depth": 1}));
        assert_eq!(result.links, vec!["https://a.example"]);
        assert_eq!(result.html.as_deref(), Some("<html></html>"));
        assert_eq!(result.raw, Some(serde_json::json!({"depth": 1})));
    }

    #[test]
    fn test_optional_fields_skipped_when_empty() {
        let result = SearchResult::new("https://example.com", "Title", "Content");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"url":"https://example.com","title":"Title","content":"Content"}"#
        );
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"url":"u","title":"t"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.content, "");
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_search_response_add_result_keeps_order() {
        let mut response = SearchResponse::new();
        assert!(response.is_empty());
        response.add_result(SearchResult::new("url1", "title1", "content1"));
        response.add_result(SearchResult::new("url2", "title2", "content2"));
        assert_eq!(response.len(), 2);
        assert_eq!(response.items()[0].url, "url1");
        assert_eq!(response.items()[1].url, "url2");
    }

    #[test]
    fn test_search_response_wire_shape() {
        let response = SearchResponse::from(vec![SearchResult::new("u", "t", "c")]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"results": [{"url": "u", "title": "t", "content": "c"}]})
        );
    }

    #[test]
    fn test_search_response_into_items() {
        let response = SearchResponse::from_results(vec![SearchResult::new("u", "t", "c")]);
        let items = response.into_items();
        assert_eq!(items.len(), 1);
    }
}
