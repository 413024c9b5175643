//! Environment-style configuration.
//!
//! Settings are a flat key/value map, read from the process environment
//! (after loading an optional `.env` file) or built from explicit pairs.
//! An empty value is treated the same as an unset one.

use std::collections::HashMap;

/// Name of the setting that selects the backend.
pub const SEARCH_PROVIDER: &str = "SEARCH_PROVIDER";
/// Backend used when `SEARCH_PROVIDER` is unset.
pub const DEFAULT_PROVIDER: &str = "searxng";

pub const SEARXNG_BASE_URL: &str = "SEARXNG_BASE_URL";
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";
pub const BING_API_KEY: &str = "BING_API_KEY";
pub const CRAWL4AI_BASE_URL: &str = "CRAWL4AI_BASE_URL";
pub const CRAWL4AI_API_KEY: &str = "CRAWL4AI_API_KEY";
pub const FIRECRAWL_BASE_URL: &str = "FIRECRAWL_BASE_URL";
pub const FIRECRAWL_API_KEY: &str = "FIRECRAWL_API_KEY";
/// Path to a Chrome/Chromium executable for the headless provider.
pub const CHROME: &str = "CHROME";
/// Cache store connection string. Absent means caching is disabled.
pub const REDIS_URL: &str = "REDIS_URL";

/// A snapshot of environment-style settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Creates an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the process environment, loading `.env` first if present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_pairs(std::env::vars())
    }

    /// Builds settings from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Sets a value, returning the updated settings.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns a non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns the value for `key` or `default` when unset.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.get_or(SEARCH_PROVIDER, DEFAULT_PROVIDER)
    }

    /// Cache store connection string, if caching is enabled.
    pub fn cache_url(&self) -> Option<&str> {
        self.get(REDIS_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_empty() {
        let settings = Settings::new();
        assert!(settings.get(SEARXNG_BASE_URL).is_none());
        assert!(settings.cache_url().is_none());
    }

    #[test]
    fn test_settings_from_pairs() {
        let settings = Settings::from_pairs([(TAVILY_API_KEY, "tvly-123")]);
        assert_eq!(settings.get(TAVILY_API_KEY), Some("tvly-123"));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let settings = Settings::new()
            .with(BING_API_KEY, "")
            .with(SERPER_API_KEY, "   ");
        assert!(settings.get(BING_API_KEY).is_none());
        assert!(settings.get(SERPER_API_KEY).is_none());
    }

    #[test]
    fn test_provider_name_default() {
        assert_eq!(Settings::new().provider_name(), "searxng");
    }

    #[test]
    fn test_provider_name_override() {
        let settings = Settings::new().with(SEARCH_PROVIDER, "bing");
        assert_eq!(settings.provider_name(), "bing");
    }

    #[test]
    fn test_get_or() {
        let settings = Settings::new().with(CRAWL4AI_BASE_URL, "http://crawler:9000");
        assert_eq!(
            settings.get_or(CRAWL4AI_BASE_URL, "http://localhost"),
            "http://crawler:9000"
        );
        assert_eq!(
            settings.get_or(FIRECRAWL_BASE_URL, "http://localhost"),
            "http://localhost"
        );
    }

    #[test]
    fn test_cache_url() {
        let settings = Settings::new().with(REDIS_URL, "redis://127.0.0.1/");
        assert_eq!(settings.cache_url(), Some("redis://127.0.0.1/"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut settings = Settings::new().with(SEARCH_PROVIDER, "tavily");
        settings.set(SEARCH_PROVIDER, "serper");
        assert_eq!(settings.provider_name(), "serper");
    }
}
