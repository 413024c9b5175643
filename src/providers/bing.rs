//! Bing Web Search API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Result, SearchProvider, SearchResponse, SearchResult};

const ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Bing Web Search API client.
pub struct Bing {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl Bing {
    /// Creates a provider authenticating with the subscription `api_key`.
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(10))?,
            api_key: api_key.to_string(),
            endpoint: ENDPOINT.to_string(),
        })
    }

    /// Overrides the API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResponse {
    web_pages: Option<BingWebPages>,
}

#[derive(Deserialize)]
struct BingWebPages {
    #[serde(default)]
    value: Vec<BingWebPage>,
}

#[derive(Deserialize)]
struct BingWebPage {
    url: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchProvider for Bing {
    fn name(&self) -> &str {
        "bing"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        let body: BingResponse = response.json().await?;

        let results = body
            .web_pages
            .map(|pages| {
                pages
                    .value
                    .into_iter()
                    .map(|page| SearchResult::new(page.url, page.name, page.snippet))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(results.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_bing_maps_web_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("Ocp-Apim-Subscription-Key", "bing-test"))
            .and(query_param("q", "rust lang"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_type": "SearchResponse",
                "webPages": {
                    "value": [
                        {"name": "Rust", "url": "https://www.rust-lang.org/", "snippet": "Fast and reliable"}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Bing::new("bing-test").unwrap().with_endpoint(server.uri());
        let response = provider.search("rust lang").await.unwrap();

        assert_eq!(response.len(), 1);
        assert_eq!(
            response.items()[0],
            SearchResult::new("https://www.rust-lang.org/", "Rust", "Fast and reliable")
        );
    }

    #[tokio::test]
    async fn test_bing_without_web_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_type": "SearchResponse"})))
            .mount(&server)
            .await;

        let provider = Bing::new("k").unwrap().with_endpoint(server.uri());
        assert!(provider.search("q").await.unwrap().is_empty());
    }
}
