//! Backend selection
//!
//! A configured Redis URL selects the shared backends; without one the
//! service runs on the in-process store and sliding-log limiter, each with
//! its own expiry sweeper.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use otp_core::{ExpirySweeper, MemoryOtpStore, OtpService, RateLimiter, SlidingLogRateLimiter};
use otp_shared::AppConfig;

use crate::cache::{RedisClient, RedisOtpStore};
use crate::services::RedisRateLimiter;
use crate::InfrastructureError;

/// Which family of backends is serving requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Redis => "redis",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The OTP store and rate limiter the service layer talks to
pub struct OtpBackends {
    pub otp: Arc<dyn OtpService>,
    pub limiter: Arc<dyn RateLimiter>,
    pub kind: BackendKind,
    memory_store: Option<Arc<MemoryOtpStore>>,
    limiter_sweeper: Option<ExpirySweeper>,
}

impl OtpBackends {
    /// In-process backends; must be called from within a tokio runtime
    pub fn memory(config: &AppConfig) -> Self {
        let store = Arc::new(MemoryOtpStore::new(
            config.otp.ttl(),
            config.otp.sweep_interval(),
        ));
        let limiter = Arc::new(SlidingLogRateLimiter::from_config(&config.rate_limit));
        let limiter_sweeper = ExpirySweeper::spawn(limiter.clone(), config.otp.sweep_interval());

        Self {
            otp: store.clone(),
            limiter,
            kind: BackendKind::Memory,
            memory_store: Some(store),
            limiter_sweeper: Some(limiter_sweeper),
        }
    }

    /// Shared backends on an already connected client
    pub fn redis(client: Arc<RedisClient>, config: &AppConfig) -> Self {
        Self {
            otp: Arc::new(RedisOtpStore::new(client.clone(), config.otp.ttl())),
            limiter: Arc::new(RedisRateLimiter::from_config(client, &config.rate_limit)),
            kind: BackendKind::Redis,
            memory_store: None,
            limiter_sweeper: None,
        }
    }

    /// Stop background sweepers; request handling must be finished
    pub async fn shutdown(&self) {
        if let Some(store) = &self.memory_store {
            store.shutdown().await;
        }
        if let Some(sweeper) = &self.limiter_sweeper {
            sweeper.shutdown().await;
        }
        info!(backend = %self.kind, "OTP backends shut down");
    }
}

/// Build the backends named by `config`
///
/// # Returns
/// * `Err(InfrastructureError)` - Redis is configured but unreachable
pub async fn build_backends(config: &AppConfig) -> Result<OtpBackends, InfrastructureError> {
    if !config.cache.is_enabled() {
        info!(
            ttl_secs = config.otp.ttl_seconds,
            limit = config.rate_limit.max_attempts,
            window_secs = config.rate_limit.window_seconds,
            "Using in-process OTP backends"
        );
        return Ok(OtpBackends::memory(config));
    }

    let client = RedisClient::new(config.cache.clone()).await?;
    if !client.health_check().await? {
        return Err(InfrastructureError::General(
            "Redis answered PING unexpectedly".to_string(),
        ));
    }

    info!(
        ttl_secs = config.otp.ttl_seconds,
        limit = config.rate_limit.max_attempts,
        window_secs = config.rate_limit.window_seconds,
        "Using Redis OTP backends"
    );
    Ok(OtpBackends::redis(Arc::new(client), config))
}
