//! Cache-aside search dispatch.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::cache::{self, cache_key, CacheStore, NoCache, CACHE_TTL};
use crate::config::Settings;
use crate::provider::select_provider;
use crate::{Result, SearchError, SearchProvider, SearchResponse};

enum ProviderSource {
    /// Select from settings on every search.
    Configured(Settings),
    /// Always use this provider.
    Fixed(Arc<dyn SearchProvider>),
}

/// Runs searches against the configured provider with a result cache in
/// front of it.
pub struct Dispatcher {
    source: ProviderSource,
    cache: Arc<dyn CacheStore>,
}

impl Dispatcher {
    /// Creates a dispatcher that selects its provider from `settings` on
    /// every search. Caching is disabled until [`with_cache`](Self::with_cache).
    pub fn new(settings: Settings) -> Self {
        Self {
            source: ProviderSource::Configured(settings),
            cache: Arc::new(NoCache),
        }
    }

    /// Creates a dispatcher that always uses `provider`.
    pub fn with_provider(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            source: ProviderSource::Fixed(provider),
            cache: Arc::new(NoCache),
        }
    }

    /// Creates a dispatcher from settings with the cache named by
    /// `REDIS_URL`. The cache connects on first use.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let cache = cache::open(&settings)?;
        Ok(Self::new(settings).with_cache(cache))
    }

    /// Sets the cache store.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = cache;
        self
    }

    /// Returns whether results are cached.
    pub fn caching_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    /// Searches for `query`, serving from the cache when possible.
    ///
    /// Every failure, including configuration errors, is reported as
    /// [`SearchError::SearchFailed`] carrying the underlying message.
    pub async fn perform_search(&self, query: &str) -> Result<SearchResponse> {
        self.search_cached(query).await.map_err(|e| {
            warn!("Search for {:?} failed: {}", query, e);
            SearchError::SearchFailed(e.to_string())
        })
    }

    async fn search_cached(&self, query: &str) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }

        let provider = self.provider()?;
        let key = cache_key(query);

        if self.cache.is_enabled() {
            if let Some(cached) = self.cache.get(&key).await? {
                debug!("Cache hit for {}", key);
                return Ok(serde_json::from_str(&cached)?);
            }
            debug!("Cache miss for {}", key);
        }

        let start = Instant::now();
        let results = provider.search(query).await?;
        debug!(
            "Provider {} returned {} results in {}ms",
            provider.name(),
            results.len(),
            start.elapsed().as_millis()
        );

        if self.cache.is_enabled() {
            let payload = serde_json::to_string(&results)?;
            self.cache.set_ex(&key, &payload, CACHE_TTL).await?;
        }

        Ok(results)
    }

    fn provider(&self) -> Result<Arc<dyn SearchProvider>> {
        match &self.source {
            ProviderSource::Configured(settings) => Ok(Arc::new(select_provider(settings)?)),
            ProviderSource::Fixed(provider) => Ok(Arc::clone(provider)),
        }
    }
}
