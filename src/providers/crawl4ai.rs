//! Crawl4AI crawl service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{crawl_record, target_url};
use crate::{Result, SearchProvider, SearchResponse};

/// Crawl4AI service client. The query is the URL to crawl.
pub struct Crawl4Ai {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    depth: u32,
}

impl Crawl4Ai {
    /// Endpoint of a locally hosted service.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:8000/api/v1/crawl";

    /// Creates a client posting crawl jobs to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(30))?,
            endpoint: endpoint.to_string(),
            api_key: None,
            depth: 1,
        })
    }

    /// Sets the bearer token sent with each request.
    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.map(str::to_string);
        self
    }

    /// Sets the crawl depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

#[derive(Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
    depth: u32,
}

#[async_trait]
impl SearchProvider for Crawl4Ai {
    fn name(&self) -> &str {
        "crawl4ai"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = target_url(query)?;

        let mut request = self.client.post(&self.endpoint).json(&CrawlRequest {
            url: url.as_str(),
            depth: self.depth,
        });
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let raw: serde_json::Value = response.json().await?;

        Ok(vec![crawl_record(&url, raw)].into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_crawl4ai_posts_url_and_depth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/crawl"))
            .and(body_json(json!({"url": "https://example.com/", "depth": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Example Domain",
                "markdown": "This domain is for use in examples."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Crawl4Ai::new(&format!("{}/api/v1/crawl", server.uri())).unwrap();
        let response = provider.search("https://example.com/").await.unwrap();

        assert_eq!(response.len(), 1);
        let record = &response.items()[0];
        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.title, "Example Domain");
        assert_eq!(record.content, "This domain is for use in examples.");
        assert!(record.raw.is_some());
    }

    #[tokio::test]
    async fn test_crawl4ai_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer c4a-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Crawl4Ai::new(&server.uri())
            .unwrap()
            .with_api_key(Some("c4a-token"));
        provider.search("https://example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_crawl4ai_rejects_non_url_query() {
        let provider = Crawl4Ai::new(Crawl4Ai::DEFAULT_ENDPOINT).unwrap();
        let err = provider.search("weather today").await.unwrap_err();
        assert!(matches!(err, crate::SearchError::InvalidQuery(_)));
    }

    #[test]
    fn test_crawl4ai_with_depth() {
        let provider = Crawl4Ai::new(Crawl4Ai::DEFAULT_ENDPOINT).unwrap().with_depth(3);
        assert_eq!(provider.depth, 3);
    }
}
