//! Shared utilities and common types for the OTP service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Utility functions (phone normalization, validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, JwtConfig, LogFormat, LoggingConfig,
    OtpConfig, RateLimitConfig, ServerConfig,
};
pub use utils::phone;
