//! Cache configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redis cache configuration
///
/// When `url` is absent or blank the service runs on in-process backends.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL (`redis://[:pass@]host:port[/db]` or `host:port`)
    #[serde(default)]
    pub url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Response timeout in seconds, applied to every command
    #[serde(default = "default_response_timeout")]
    pub response_timeout: u64,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            connection_timeout: default_connection_timeout(),
            response_timeout: default_response_timeout(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Configured Redis URL, normalized to a `redis://` URL
    ///
    /// A plain `host:port` value is accepted and given the `redis://` scheme.
    pub fn redis_url(&self) -> Option<String> {
        let raw = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        if raw.contains("://") {
            Some(raw.to_string())
        } else {
            Some(format!("redis://{}", raw))
        }
    }

    /// Whether a shared backend is configured
    pub fn is_enabled(&self) -> bool {
        self.redis_url().is_some()
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout)
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_response_timeout() -> u64 {
    2
}
