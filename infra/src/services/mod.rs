//! Infrastructure service implementations

pub mod auth;

pub use auth::RedisRateLimiter;
