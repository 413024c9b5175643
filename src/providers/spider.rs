//! Single-page crawl provider.
//!
//! Fetches the page named by the query and records the final URL after
//! redirects, the page title and the visible body text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::target_url;
use crate::html::parse_page;
use crate::{Result, SearchProvider, SearchResponse, SearchResult};

/// Crawls one start URL per query.
pub struct Spider {
    client: Client,
}

impl Spider {
    /// Creates a spider with a 30 second request timeout.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: super::http_client(Duration::from_secs(30))?,
        })
    }
}

#[async_trait]
impl SearchProvider for Spider {
    fn name(&self) -> &str {
        "scrapy"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let start = target_url(query)?;

        let response = self.client.get(start.as_str()).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        if final_url != start.as_str() {
            debug!("Crawl of {} redirected to {}", start, final_url);
        }
        let html = response.text().await?;
        let page = parse_page(&html)?;

        Ok(vec![SearchResult::new(
            final_url,
            page.title.unwrap_or_default(),
            page.text,
        )]
        .into())
    }
}
