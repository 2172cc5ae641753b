//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing configuration
//! - `cache` - Redis connection configuration (shared backends)
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Passcode lifetime and local sweep interval
//! - `rate_limit` - Per-phone issuance limits
//! - `server` - HTTP server configuration
//!
//! [`AppConfig::load`] layers, lowest precedence first: struct defaults, the
//! optional `config/{environment}.toml` file, `APP_`-prefixed environment
//! variables (`APP_RATE_LIMIT__MAX_ATTEMPTS=5`), and finally the plain
//! `PORT`, `JWT_SECRET` and `REDIS_URL` variables.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Passcode configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Reads a `.env` file first when one is present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for a specific environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let logging = LoggingConfig::for_environment(environment);

        let settings = config::Config::builder()
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", format!("{:?}", logging.format).to_lowercase())?
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment.to_string())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("auth.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("cache.url", env::var("REDIS_URL").ok())?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.otp.ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "otp.ttl_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.otp.sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "otp.sweep_interval_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "server.request_timeout_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit.window_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.rate_limit.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit.max_attempts",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.auth.secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "auth.secret",
                reason: "must not be empty".to_string(),
            });
        }
        if self.environment.is_production() && self.auth.uses_default_secret() {
            return Err(ConfigError::Invalid {
                field: "auth.secret",
                reason: "set JWT_SECRET in production".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.otp.ttl_seconds, 120);
        assert_eq!(config.rate_limit.max_attempts, 3);
        assert_eq!(config.rate_limit.window_seconds, 600);
        assert!(!config.cache.is_enabled());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.otp.ttl_seconds = 0;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "otp.ttl_seconds"),
            other => panic!("expected invalid ttl, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = AppConfig::default();
        config.rate_limit.window_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_requires_secret() {
        let mut config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.auth = JwtConfig::new("a-real-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_sections_with_defaults() {
        let json = r#"{
            "rate_limit": { "max_attempts": 5 },
            "cache": { "url": "redis://cache:6379" }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rate_limit.max_attempts, 5);
        assert_eq!(config.rate_limit.window_seconds, 600);
        assert!(config.cache.is_enabled());
        assert_eq!(config.server.port, 8080);
    }
}
