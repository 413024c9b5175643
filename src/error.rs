//! Error types for the search relay.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while selecting a provider or running a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Headless browser failure.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Cache store failure.
    #[error("Cache error: {0}")]
    Cache(String),

    /// A setting required by the selected provider is missing.
    #[error("{setting} is not set in the environment variables. Please set {setting} or set SEARCH_PROVIDER to one of: {alternatives}.")]
    MissingSetting {
        /// Name of the missing setting.
        setting: String,
        /// Other providers, quoted and comma-separated.
        alternatives: String,
    },

    /// The configured provider name is not recognized.
    #[error("Invalid search provider '{0}'. Set SEARCH_PROVIDER to one of: {names}.", names = crate::provider::ProviderKind::quoted_names(&[]))]
    InvalidProvider(String),

    /// The provider is known but unavailable in this build.
    #[error("Search provider '{provider}' requires the `{feature}` feature")]
    FeatureDisabled {
        /// Provider name.
        provider: String,
        /// Cargo feature that enables it.
        feature: String,
    },

    /// Collapsed failure reported by the dispatcher.
    #[error("There was an error while searching: {0}")]
    SearchFailed(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl From<redis::RedisError> for SearchError {
    fn from(err: redis::RedisError) -> Self {
        SearchError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Parse(err.to_string())
    }
}

impl SearchError {
    /// Returns true for errors caused by the configuration rather than a backend.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SearchError::MissingSetting { .. }
                | SearchError::InvalidProvider(_)
                | SearchError::FeatureDisabled { .. }
        )
    }

    /// HTTP status reported to callers. Every failure surfaces as 500.
    pub fn status_code(&self) -> u16 {
        500
    }
}
