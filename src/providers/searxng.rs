//! SearXNG provider using an instance's JSON API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Result, SearchProvider, SearchResponse, SearchResult};

/// SearXNG metasearch instance.
pub struct Searxng {
    client: Client,
    base_url: String,
}

impl Searxng {
    /// Creates a provider for the instance at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(10))?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the instance base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngResult>,
}

#[derive(Deserialize)]
struct SearxngResult {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl SearchProvider for Searxng {
    fn name(&self) -> &str {
        "searxng"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = format!(
            "{}/search?q={}&format=json",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: SearxngResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .map(|item| SearchResult::new(item.url, item.title, item.content))
            .collect::<Vec<_>>()
            .into())
    }
}
