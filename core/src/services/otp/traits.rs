//! Capability trait implemented by every OTP store backend

use async_trait::async_trait;

use crate::context::Context;
use crate::errors::OtpResult;

/// Issues and validates one-time codes per phone
///
/// Wrong, missing and expired codes all validate as `Ok(false)`; errors are
/// reserved for failures of the random source or the backing store.
#[async_trait]
pub trait OtpService: Send + Sync {
    /// Issue a fresh code for `phone`, replacing any live one
    async fn generate(&self, ctx: &Context, phone: &str) -> OtpResult<String>;

    /// Consume the live code for `phone` if `code` matches it
    ///
    /// A mismatch leaves the live code usable.
    async fn validate(&self, ctx: &Context, phone: &str, code: &str) -> OtpResult<bool>;
}
