//! Cache module for Redis-backed state
//!
//! This module provides the Redis client with startup connection retry and
//! the shared OTP store built on it.

pub mod otp_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use otp_shared::config::cache::CacheConfig;
