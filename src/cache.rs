//! Result cache stores.
//!
//! The dispatcher talks to a [`CacheStore`]; [`RedisCache`] is the real
//! store and [`NoCache`] stands in when caching is disabled.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::Settings;
use crate::{Result, SearchError};

/// Lifetime of a cached search response.
pub const CACHE_TTL: Duration = Duration::from_secs(7200);

/// Cache key for a query.
pub fn cache_key(query: &str) -> String {
    format!("search:{}", query)
}

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether the store holds anything at all. Disabled stores are never
    /// read or written.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Returns the value stored under `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

/// Cache store used when caching is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl CacheStore for NoCache {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }
}

/// How long the first command waits for the Redis connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis-backed cache store.
///
/// The connection is opened on first use, so an unreachable server fails
/// individual reads and writes rather than startup. A failed attempt is
/// retried by the next command; once connected, the manager reconnects on
/// its own.
pub struct RedisCache {
    client: redis::Client,
    manager: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Creates a store for the Redis server at `url` without connecting.
    pub fn open(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            manager: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                debug!("Connecting to result cache");
                let connect = self.client.get_connection_manager();
                match tokio::time::timeout(CONNECT_TIMEOUT, connect).await {
                    Ok(result) => result.map_err(SearchError::from),
                    Err(_) => Err(SearchError::Cache(format!(
                        "Timed out after {}s connecting to Redis",
                        CONNECT_TIMEOUT.as_secs()
                    ))),
                }
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }
}

/// Opens the cache store named by `REDIS_URL`, or [`NoCache`] when unset.
///
/// Only a malformed URL fails here; connection problems surface on use.
pub fn open(settings: &Settings) -> Result<Arc<dyn CacheStore>> {
    match settings.cache_url() {
        Some(url) => {
            let cache = RedisCache::open(url)?;
            info!("Result cache enabled");
            Ok(Arc::new(cache))
        }
        None => {
            info!("REDIS_URL not set, result cache disabled");
            Ok(Arc::new(NoCache))
        }
    }
}
