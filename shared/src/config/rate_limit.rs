//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-phone OTP issuance rate limit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Max issuance attempts per phone within one window
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_seconds: default_window_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// Create a configuration with explicit limit and window
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window_seconds: window.as_secs(),
        }
    }

    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_window_seconds() -> u64 {
    600 // 10 minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.window(), Duration::from_secs(600));
    }

    #[test]
    fn test_rate_limit_new() {
        let config = RateLimitConfig::new(5, Duration::from_secs(60));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.window_seconds, 60);
    }
}
