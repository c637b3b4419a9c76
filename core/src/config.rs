//! Client configuration.
//!
//! `ClientConfig::from_env` reads:
//! - `NEWSAPI_KEY` (required)
//! - `NEWSAPI_BASE_URL` (default `https://newsapi.org`)
//! - `NEWSAPI_TIMEOUT_SECS` (default 30)

use std::time::Duration;

use crate::auth::ApiKey;
use crate::domains::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const ENV_API_KEY: &str = "NEWSAPI_KEY";
pub const ENV_BASE_URL: &str = "NEWSAPI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NEWSAPI_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("NEWSAPI_KEY is not set")]
    MissingApiKey,

    #[error("NEWSAPI_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(&base_url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
