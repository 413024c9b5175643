//! Search provider trait and provider selection.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{self, Settings};
#[cfg(feature = "headless")]
use crate::providers::Headless;
use crate::providers::{Bing, Crawl4Ai, Firecrawl, HtmlParse, Searxng, Serper, Spider, Tavily};
use crate::{Result, SearchError, SearchResponse};

/// Trait for backends that turn a query into results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the provider name as used in configuration.
    fn name(&self) -> &str;

    /// Runs the query against the backend.
    async fn search(&self, query: &str) -> Result<SearchResponse>;
}

/// The closed set of supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Searxng,
    Tavily,
    Serper,
    Bing,
    Crawl4Ai,
    Firecrawl,
    Scrapy,
    Playwright,
    Bs4,
}

impl ProviderKind {
    /// Every provider, in the order they are listed to users.
    pub const ALL: [ProviderKind; 9] = [
        ProviderKind::Searxng,
        ProviderKind::Tavily,
        ProviderKind::Serper,
        ProviderKind::Bing,
        ProviderKind::Crawl4Ai,
        ProviderKind::Firecrawl,
        ProviderKind::Scrapy,
        ProviderKind::Playwright,
        ProviderKind::Bs4,
    ];

    /// Configuration name of the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Searxng => "searxng",
            ProviderKind::Tavily => "tavily",
            ProviderKind::Serper => "serper",
            ProviderKind::Bing => "bing",
            ProviderKind::Crawl4Ai => "crawl4ai",
            ProviderKind::Firecrawl => "firecrawl",
            ProviderKind::Scrapy => "scrapy",
            ProviderKind::Playwright => "playwright",
            ProviderKind::Bs4 => "bs4",
        }
    }

    /// Setting that must be present to select this provider.
    pub fn required_setting(self) -> Option<&'static str> {
        match self {
            ProviderKind::Searxng => Some(config::SEARXNG_BASE_URL),
            ProviderKind::Tavily => Some(config::TAVILY_API_KEY),
            ProviderKind::Serper => Some(config::SERPER_API_KEY),
            ProviderKind::Bing => Some(config::BING_API_KEY),
            _ => None,
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            ProviderKind::Searxng => "Self-hosted SearXNG instance (JSON API)",
            ProviderKind::Tavily => "Tavily hosted search API",
            ProviderKind::Serper => "Serper Google search API",
            ProviderKind::Bing => "Bing Web Search API",
            ProviderKind::Crawl4Ai => "Crawl4AI crawl service (query is a URL)",
            ProviderKind::Firecrawl => "Firecrawl crawl service (query is a URL)",
            ProviderKind::Scrapy => "Single-page crawl: title and body text (query is a URL)",
            ProviderKind::Playwright => "Headless Chrome render (query is a URL)",
            ProviderKind::Bs4 => "Fetch and parse HTML: title, text, links (query is a URL)",
        }
    }

    /// Quoted, comma-separated provider names, skipping `exclude`.
    pub fn quoted_names(exclude: &[ProviderKind]) -> String {
        Self::ALL
            .iter()
            .filter(|kind| !exclude.contains(kind))
            .map(|kind| format!("'{}'", kind.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds the provider from settings.
    pub fn build(self, settings: &Settings) -> Result<Provider> {
        let provider = match self {
            ProviderKind::Searxng => {
                Provider::Searxng(Searxng::new(self.require(settings)?)?)
            }
            ProviderKind::Tavily => Provider::Tavily(Tavily::new(self.require(settings)?)?),
            ProviderKind::Serper => Provider::Serper(Serper::new(self.require(settings)?)?),
            ProviderKind::Bing => Provider::Bing(Bing::new(self.require(settings)?)?),
            ProviderKind::Crawl4Ai => Provider::Crawl4Ai(
                Crawl4Ai::new(settings.get_or(config::CRAWL4AI_BASE_URL, Crawl4Ai::DEFAULT_ENDPOINT))?
                    .with_api_key(settings.get(config::CRAWL4AI_API_KEY)),
            ),
            ProviderKind::Firecrawl => Provider::Firecrawl(
                Firecrawl::new(settings.get_or(config::FIRECRAWL_BASE_URL, Firecrawl::DEFAULT_ENDPOINT))?
                    .with_api_key(settings.get(config::FIRECRAWL_API_KEY)),
            ),
            ProviderKind::Scrapy => Provider::Scrapy(Spider::new()?),
            #[cfg(feature = "headless")]
            ProviderKind::Playwright => {
                Provider::Playwright(Headless::new(settings.get(config::CHROME)))
            }
            #[cfg(not(feature = "headless"))]
            ProviderKind::Playwright => {
                return Err(SearchError::FeatureDisabled {
                    provider: self.as_str().to_string(),
                    feature: "headless".to_string(),
                })
            }
            ProviderKind::Bs4 => Provider::Bs4(HtmlParse::new()?),
        };
        Ok(provider)
    }

    fn require<'a>(self, settings: &'a Settings) -> Result<&'a str> {
        let Some(setting) = self.required_setting() else {
            return Err(SearchError::Other(format!(
                "Provider '{}' has no required setting",
                self.as_str()
            )));
        };
        settings.get(setting).ok_or_else(|| SearchError::MissingSetting {
            setting: setting.to_string(),
            alternatives: Self::quoted_names(&[self]),
        })
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| SearchError::InvalidProvider(name.to_string()))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured backend, one variant per [`ProviderKind`].
pub enum Provider {
    Searxng(Searxng),
    Tavily(Tavily),
    Serper(Serper),
    Bing(Bing),
    Crawl4Ai(Crawl4Ai),
    Firecrawl(Firecrawl),
    Scrapy(Spider),
    #[cfg(feature = "headless")]
    Playwright(Headless),
    Bs4(HtmlParse),
}

impl Provider {
    /// Returns which backend this is.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Searxng(_) => ProviderKind::Searxng,
            Provider::Tavily(_) => ProviderKind::Tavily,
            Provider::Serper(_) => ProviderKind::Serper,
            Provider::Bing(_) => ProviderKind::Bing,
            Provider::Crawl4Ai(_) => ProviderKind::Crawl4Ai,
            Provider::Firecrawl(_) => ProviderKind::Firecrawl,
            Provider::Scrapy(_) => ProviderKind::Scrapy,
            #[cfg(feature = "headless")]
            Provider::Playwright(_) => ProviderKind::Playwright,
            Provider::Bs4(_) => ProviderKind::Bs4,
        }
    }

    fn inner(&self) -> &dyn SearchProvider {
        match self {
            Provider::Searxng(p) => p,
            Provider::Tavily(p) => p,
            Provider::Serper(p) => p,
            Provider::Bing(p) => p,
            Provider::Crawl4Ai(p) => p,
            Provider::Firecrawl(p) => p,
            Provider::Scrapy(p) => p,
            #[cfg(feature = "headless")]
            Provider::Playwright(p) => p,
            Provider::Bs4(p) => p,
        }
    }
}

#[async_trait]
impl SearchProvider for Provider {
    fn name(&self) -> &str {
        self.inner().name()
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.inner().search(query).await
    }
}

/// Selects the provider named by `SEARCH_PROVIDER` (default `searxng`).
pub fn select_provider(settings: &Settings) -> Result<Provider> {
    let kind: ProviderKind = settings.provider_name().parse()?;
    debug!("Selected search provider: {}", kind);
    kind.build(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;

    fn complete_settings() -> Settings {
        Settings::new()
            .with(SEARXNG_BASE_URL, "http://localhost:8080")
            .with(TAVILY_API_KEY, "tvly-key")
            .with(SERPER_API_KEY, "serper-key")
            .with(BING_API_KEY, "bing-key")
    }

    #[test]
    fn test_provider_kind_round_trips_names() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_provider_kind_parse_is_case_sensitive() {
        assert!("SearXNG".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_quoted_names_excludes() {
        let names = ProviderKind::quoted_names(&[ProviderKind::Tavily]);
        assert!(names.starts_with("'searxng', 'serper'"));
        assert!(!names.contains("tavily"));
    }

    #[test]
    fn test_default_provider_is_searxng() {
        let settings = Settings::new().with(SEARXNG_BASE_URL, "http://localhost:8080");
        let provider = select_provider(&settings).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Searxng);
        assert_eq!(provider.name(), "searxng");
    }

    #[test]
    fn test_every_provider_selects_with_settings_present() {
        for kind in ProviderKind::ALL {
            let settings = complete_settings().with(SEARCH_PROVIDER, kind.as_str());
            let result = select_provider(&settings);
            if cfg!(not(feature = "headless")) && kind == ProviderKind::Playwright {
                assert!(matches!(result, Err(SearchError::FeatureDisabled { .. })));
                continue;
            }
            let provider = result.unwrap_or_else(|e| panic!("{} failed: {}", kind, e));
            assert_eq!(provider.kind(), kind);
            assert_eq!(provider.name(), kind.as_str());
        }
    }

    #[test]
    fn test_local_providers_select_matching_variants() {
        let select = |name: &str| select_provider(&Settings::new().with(SEARCH_PROVIDER, name));
        assert!(matches!(select("scrapy"), Ok(Provider::Scrapy(_))));
        assert!(matches!(select("bs4"), Ok(Provider::Bs4(_))));
        #[cfg(feature = "headless")]
        assert!(matches!(select("playwright"), Ok(Provider::Playwright(_))));
    }

    #[test]
    fn test_missing_required_setting_is_named() {
        for kind in ProviderKind::ALL {
            let Some(setting) = kind.required_setting() else {
                continue;
            };
            let settings = Settings::new().with(SEARCH_PROVIDER, kind.as_str());
            let err = select_provider(&settings).err().unwrap();
            match &err {
                SearchError::MissingSetting { setting: missing, .. } => {
                    assert_eq!(missing, setting)
                }
                other => panic!("unexpected error for {}: {}", kind, other),
            }
            assert!(err.to_string().contains(setting));
            assert!(err.is_config_error());
        }
    }

    #[test]
    fn test_missing_setting_suggests_other_providers() {
        let settings = Settings::new().with(SEARCH_PROVIDER, "bing");
        let msg = select_provider(&settings).err().unwrap().to_string();
        assert!(msg.contains("BING_API_KEY"));
        assert!(msg.contains("'searxng', 'tavily', 'serper'"));
        assert!(!msg.contains("'bing'"));
    }

    #[test]
    fn test_credential_free_providers_need_no_settings() {
        for name in ["crawl4ai", "firecrawl", "scrapy", "bs4"] {
            let settings = Settings::new().with(SEARCH_PROVIDER, name);
            assert!(select_provider(&settings).is_ok(), "{} should select", name);
        }
    }

    #[test]
    fn test_invalid_provider_lists_valid_names() {
        let settings = Settings::new().with(SEARCH_PROVIDER, "altavista");
        let err = select_provider(&settings).err().unwrap();
        assert!(matches!(err, SearchError::InvalidProvider(ref n) if n == "altavista"));
        let msg = err.to_string();
        for kind in ProviderKind::ALL {
            assert!(msg.contains(kind.as_str()));
        }
    }

    #[test]
    fn test_required_settings_table() {
        assert_eq!(ProviderKind::Searxng.required_setting(), Some("SEARXNG_BASE_URL"));
        assert_eq!(ProviderKind::Tavily.required_setting(), Some("TAVILY_API_KEY"));
        assert_eq!(ProviderKind::Serper.required_setting(), Some("SERPER_API_KEY"));
        assert_eq!(ProviderKind::Bing.required_setting(), Some("BING_API_KEY"));
        assert_eq!(ProviderKind::Bs4.required_setting(), None);
    }
}
