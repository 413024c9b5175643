//! # search-relay
//!
//! A dispatch layer that forwards a search query to one configured backend
//! and caches the answer.
//!
//! - Provider selection from environment-style settings (`SEARCH_PROVIDER`)
//! - Hosted search APIs (SearXNG, Tavily, Serper, Bing)
//! - Crawl services (Crawl4AI, Firecrawl) and local page extraction
//!   (single-page crawl, HTML parsing, headless Chrome)
//! - Cache-aside dispatch with a Redis store and a fixed two hour TTL
//!
//! ## Example
//!
//! ```rust,no_run
//! use search_relay::{Dispatcher, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = Dispatcher::from_settings(Settings::from_env())?;
//!     let results = dispatcher.perform_search("rust programming").await?;
//!
//!     for result in results.items() {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod dispatch;
mod error;
mod provider;
mod result;

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod fetcher_http;
pub mod html;
pub mod providers;
pub mod server;

#[cfg(feature = "headless")]
pub mod browser;
#[cfg(feature = "headless")]
pub mod browser_setup;

pub use cache::{CacheStore, NoCache, RedisCache};
pub use config::Settings;
pub use dispatch::Dispatcher;
pub use error::{Result, SearchError};
pub use provider::{select_provider, Provider, ProviderKind, SearchProvider};
pub use result::{SearchResponse, SearchResult};
