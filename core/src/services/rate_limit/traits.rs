//! Capability trait implemented by every rate limiter backend

use async_trait::async_trait;

use crate::context::Context;
use crate::errors::OtpResult;

/// Admits or rejects an issuance attempt for a phone
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record an attempt for `phone` and report whether it is admitted
    ///
    /// Rejection is `Ok(false)`; errors mean the limiter itself failed.
    async fn allow(&self, ctx: &Context, phone: &str) -> OtpResult<bool>;
}
