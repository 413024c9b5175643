//! Tavily hosted search API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Result, SearchProvider, SearchResponse, SearchResult};

const ENDPOINT: &str = "https://api.tavily.com/search";
const MAX_RESULTS: u32 = 10;

/// Tavily search API client.
pub struct Tavily {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl Tavily {
    /// Creates a provider authenticating with `api_key`.
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(15))?,
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

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl SearchProvider for Tavily {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results: MAX_RESULTS,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: TavilyResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .map(|item| SearchResult::new(item.url, item.title, item.content))
            .collect::<Vec<_>>()
            .into())
    }
}
