//! # Infrastructure Layer
//!
//! Concrete backends for the OTP service.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client, the shared OTP store and its compare-and-delete script
//! - **Services**: the shared fixed-window rate limiter
//! - **Database**: the in-memory user repository
//! - **Backend**: startup selection between in-process and Redis backends

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Backend wiring - picks local or shared implementations at startup
pub mod backend;

/// Cache module - Redis client and the shared OTP store
pub mod cache;

/// Database module - user storage
pub mod database;

/// Services module - Infrastructure service implementations
pub mod services;

pub use backend::{build_backends, BackendKind, OtpBackends};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for OtpError {
    fn from(error: InfrastructureError) -> Self {
        OtpError::backend(error.to_string())
    }
}
