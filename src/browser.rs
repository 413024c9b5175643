//! Headless Chrome page rendering.
//!
//! Only available with the `headless` Cargo feature. A single browser
//! process is launched lazily and shared by every render in the process; a
//! semaphore bounds the number of open tabs.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

use crate::fetcher::PageFetcher;
use crate::{Result, SearchError};

/// Configuration for the browser pool.
#[derive(Debug, Clone)]
pub struct BrowserPoolConfig {
    /// Maximum number of concurrent browser tabs.
    pub max_tabs: usize,
    /// Path to the Chrome/Chromium executable. If `None`, auto-detected.
    pub chrome_path: Option<String>,
}

impl Default for BrowserPoolConfig {
    fn default() -> Self {
        Self {
            max_tabs: 4,
            chrome_path: None,
        }
    }
}

static SHARED_POOL: OnceLock<Arc<BrowserPool>> = OnceLock::new();

/// One shared browser process with bounded tab concurrency.
pub struct BrowserPool {
    config: BrowserPoolConfig,
    browser: Mutex<Option<Arc<Browser>>>,
    tab_semaphore: Arc<Semaphore>,
}

impl BrowserPool {
    /// Creates a new browser pool with the given configuration.
    pub fn new(config: BrowserPoolConfig) -> Self {
        let max_tabs = config.max_tabs;
        Self {
            config,
            browser: Mutex::new(None),
            tab_semaphore: Arc::new(Semaphore::new(max_tabs)),
        }
    }

    /// Returns the process-wide pool, creating it from `config` on first call.
    ///
    /// Later calls return the same pool and ignore their `config`.
    pub fn shared(config: BrowserPoolConfig) -> Arc<BrowserPool> {
        Arc::clone(SHARED_POOL.get_or_init(|| Arc::new(BrowserPool::new(config))))
    }

    /// Returns the tab semaphore for acquiring permits before opening tabs.
    pub fn tab_semaphore(&self) -> &Arc<Semaphore> {
        &self.tab_semaphore
    }

    /// Launches the browser on first use and returns a shared handle.
    pub async fn acquire_browser(&self) -> Result<Arc<Browser>> {
        let mut guard = self.browser.lock().await;

        if let Some(ref browser) = *guard {
            return Ok(Arc::clone(browser));
        }

        debug!("Launching headless browser");

        let chrome_path = match self.config.chrome_path {
            Some(ref path) => PathBuf::from(path),
            None => crate::browser_setup::ensure_chrome()?,
        };
        debug!("Using Chrome at: {}", chrome_path.display());

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--mute-audio")
            .arg("--no-first-run")
            .build()
            .map_err(|e| SearchError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SearchError::Browser(format!("Failed to launch browser: {}", e)))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser CDP handler error: {}", e);
                }
            }
            debug!("Browser CDP handler exited");
        });

        let browser = Arc::new(browser);
        *guard = Some(Arc::clone(&browser));

        Ok(browser)
    }
}

/// A `PageFetcher` that renders pages in a browser tab.
///
/// Each fetch takes a tab permit, opens a tab, navigates, waits for the
/// load event, reads the rendered HTML, and closes the tab. Navigation is
/// bounded by `timeout`.
pub struct BrowserFetcher {
    pool: Arc<BrowserPool>,
    timeout: Duration,
}

impl BrowserFetcher {
    /// Creates a fetcher with a 60 second navigation timeout.
    pub fn new(pool: Arc<BrowserPool>) -> Self {
        Self {
            pool,
            timeout: Duration::from_secs(60),
        }
    }

    async fn render(&self, page: &Page) -> Result<String> {
        page.wait_for_navigation()
            .await
            .map_err(|e| SearchError::Browser(format!("Navigation wait failed: {}", e)))?;

        page.content()
            .await
            .map_err(|e| SearchError::Browser(format!("Failed to get page content: {}", e)))
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let _permit = self
            .pool
            .tab_semaphore()
            .acquire()
            .await
            .map_err(|e| SearchError::Browser(format!("Tab semaphore closed: {}", e)))?;

        let browser = self.pool.acquire_browser().await?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SearchError::Browser(format!("Failed to open tab: {}", e)))?;

        let rendered = tokio::time::timeout(self.timeout, async {
            page.goto(url)
                .await
                .map_err(|e| SearchError::Browser(format!("Navigation to {} failed: {}", url, e)))?;
            self.render(&page).await
        })
        .await
        .unwrap_or_else(|_| {
            Err(SearchError::Browser(format!(
                "Timed out after {}s loading {}",
                self.timeout.as_secs(),
                url
            )))
        });

        // Best-effort; a failed close does not fail the fetch.
        if let Err(e) = page.close().await {
            warn!("Failed to close browser tab: {}", e);
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_pool_config_default() {
        let config = BrowserPoolConfig::default();
        assert_eq!(config.max_tabs, 4);
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_browser_pool_custom_tabs() {
        let pool = BrowserPool::new(BrowserPoolConfig {
            max_tabs: 2,
            ..Default::default()
        });
        assert_eq!(pool.tab_semaphore().available_permits(), 2);
    }

    #[test]
    fn test_shared_pool_is_process_wide() {
        let first = BrowserPool::shared(BrowserPoolConfig::default());
        let second = BrowserPool::shared(BrowserPoolConfig {
            max_tabs: 1,
            chrome_path: Some("/opt/other/chrome".to_string()),
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.tab_semaphore().available_permits(), 4);
    }

    #[tokio::test]
    async fn test_tab_permits_bound_concurrency() {
        let pool = BrowserPool::new(BrowserPoolConfig {
            max_tabs: 1,
            ..Default::default()
        });
        let held = pool.tab_semaphore().acquire().await.unwrap();
        assert!(pool.tab_semaphore().try_acquire().is_err());
        drop(held);
        assert!(pool.tab_semaphore().try_acquire().is_ok());
    }

    #[test]
    fn test_browser_fetcher_default_timeout() {
        let pool = Arc::new(BrowserPool::new(BrowserPoolConfig::default()));
        let fetcher = BrowserFetcher::new(pool);
        assert_eq!(fetcher.timeout, Duration::from_secs(60));
    }
}
