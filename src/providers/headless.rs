//! Headless-browser provider: renders the page named by the query.

use std::sync::Arc;

use async_trait::async_trait;

use super::target_url;
use crate::browser::{BrowserFetcher, BrowserPool, BrowserPoolConfig};
use crate::fetcher::PageFetcher;
use crate::html::parse_page;
use crate::{Result, SearchProvider, SearchResponse, SearchResult};

/// Renders one page in headless Chrome and returns its title and HTML.
pub struct Headless {
    fetcher: Arc<dyn PageFetcher>,
}

impl Headless {
    /// Creates a provider rendering in the process-wide browser pool.
    ///
    /// `chrome_path` overrides executable detection. It only takes effect
    /// for the first provider created in the process, which launches the
    /// shared browser.
    pub fn new(chrome_path: Option<&str>) -> Self {
        let pool = BrowserPool::shared(BrowserPoolConfig {
            chrome_path: chrome_path.map(str::to_string),
            ..Default::default()
        });
        Self::with_fetcher(Arc::new(BrowserFetcher::new(pool)))
    }

    /// Creates a provider using the given fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SearchProvider for Headless {
    fn name(&self) -> &str {
        "playwright"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = target_url(query)?;
        let html = self.fetcher.fetch(url.as_str()).await?;
        let title = parse_page(&html)?.title.unwrap_or_default();

        Ok(vec![SearchResult::new(query.trim(), title, "").with_html(html)].into())
    }
}
