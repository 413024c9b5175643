//! Fetch-and-parse provider: one page's title, text and links.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::target_url;
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::html::parse_html;
use crate::{Result, SearchProvider, SearchResponse};

/// Fetches the page named by the query and parses its HTML.
pub struct HtmlParse {
    fetcher: Arc<dyn PageFetcher>,
}

impl HtmlParse {
    /// Creates a provider fetching over plain HTTP with a 20 second timeout.
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new(
            Duration::from_secs(20),
        )?)))
    }

    /// Creates a provider using the given fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SearchProvider for HtmlParse {
    fn name(&self) -> &str {
        "bs4"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = target_url(query)?;
        let html = self.fetcher.fetch(url.as_str()).await?;
        let record = parse_html(&html, query.trim())?;
        Ok(vec![record].into())
    }
}
