//! Firecrawl structured crawl service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{crawl_record, target_url};
use crate::{Result, SearchProvider, SearchResponse};

/// Firecrawl service client. The query is the URL to crawl.
pub struct Firecrawl {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl Firecrawl {
    /// Endpoint of a locally hosted service.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:3000/crawl";

    /// Creates a client posting crawl jobs to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(30))?,
            endpoint: endpoint.to_string(),
            api_key: None,
        })
    }

    /// Sets the bearer token sent with each request.
    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.map(str::to_string);
        self
    }
}

#[derive(Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
    extract_links: bool,
}

#[async_trait]
impl SearchProvider for Firecrawl {
    fn name(&self) -> &str {
        "firecrawl"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = target_url(query)?;

        let mut request = self.client.post(&self.endpoint).json(&CrawlRequest {
            url: url.as_str(),
            extract_links: true,
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
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_firecrawl_requests_links() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crawl"))
            .and(body_json(json!({"url": "https://example.com/docs", "extract_links": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "markdown": "Docs",
                    "metadata": {"title": "Documentation"},
                    "links": ["https://example.com/docs/a"]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Firecrawl::new(&format!("{}/crawl", server.uri())).unwrap();
        let response = provider.search("https://example.com/docs").await.unwrap();

        let record = &response.items()[0];
        assert_eq!(record.title, "Documentation");
        assert_eq!(record.content, "Docs");
        assert_eq!(record.links, vec!["https://example.com/docs/a"]);
    }

    #[tokio::test]
    async fn test_firecrawl_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let provider = Firecrawl::new(&server.uri()).unwrap();
        assert!(provider.search("https://example.com").await.is_err());
    }
}
