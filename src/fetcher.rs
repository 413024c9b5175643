//! Page fetcher abstraction used by the page-extracting providers.

use async_trait::async_trait;

use crate::Result;

/// Fetches the HTML of a URL.
///
/// Implementations may use plain HTTP requests or a headless browser.
/// Timeouts are fixed at construction time.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    async fn fetch(&self, url: &str) -> Result<String>;
}
