//! Serper (Google results) search API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Result, SearchProvider, SearchResponse, SearchResult};

const ENDPOINT: &str = "https://google.serper.dev/search";

/// Serper search API client.
pub struct Serper {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl Serper {
    /// Creates a provider authenticating with `api_key`.
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
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Deserialize)]
struct SerperResult {
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchProvider for Serper {
    fn name(&self) -> &str {
        "serper"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?
            .error_for_status()?;
        let body: SerperResponse = response.json().await?;

        Ok(body
            .organic
            .into_iter()
            .map(|item| SearchResult::new(item.link, item.title, item.snippet))
            .collect::<Vec<_>>()
            .into())
    }
}
