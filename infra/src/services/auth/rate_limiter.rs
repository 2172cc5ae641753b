//! Redis-based fixed-window rate limiter

use async_trait::async_trait;
use chrono::Utc;
use redis::Script;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use otp_core::{Context, OtpResult, RateLimiter};
use otp_shared::utils::mask_phone;
use otp_shared::RateLimitConfig;

use crate::cache::otp_store::redis_failure;
use crate::cache::redis_client::RedisClient;

const COUNTER_KEY_PREFIX: &str = "otp:rl";

/// Increments the bucket counter and arms its expiry on creation
const INCREMENT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return count
"#;

/// Redis-backed implementation of [`RateLimiter`]
///
/// Counts attempts per phone in wall-clock buckets of `window` length. The
/// counter key expires with its bucket, so it can never outlive the window.
/// Up to twice the limit can pass around a bucket boundary.
pub struct RedisRateLimiter {
    redis_client: Arc<RedisClient>,
    limit: u64,
    window: Duration,
    increment: Script,
}

impl RedisRateLimiter {
    /// Create a new Redis-based rate limiter
    pub fn new(redis_client: Arc<RedisClient>, limit: u64, window: Duration) -> Self {
        Self {
            redis_client,
            limit,
            window,
            increment: Script::new(INCREMENT_SCRIPT),
        }
    }

    pub fn from_config(redis_client: Arc<RedisClient>, config: &RateLimitConfig) -> Self {
        Self::new(redis_client, u64::from(config.max_attempts), config.window())
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn window_ms(&self) -> i64 {
        (self.window.as_millis() as i64).max(1)
    }
}

/// Index of the fixed window containing `now_ms`
pub(crate) fn bucket_for(now_ms: i64, window_ms: i64) -> i64 {
    now_ms.div_euclid(window_ms)
}

/// Unprefixed counter key for one phone and bucket
pub(crate) fn counter_key(phone: &str, bucket: i64) -> String {
    format!("{}:{}:{}", COUNTER_KEY_PREFIX, phone, bucket)
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn allow(&self, ctx: &Context, phone: &str) -> OtpResult<bool> {
        ctx.check()?;

        let window_ms = self.window_ms();
        let bucket = bucket_for(Utc::now().timestamp_millis(), window_ms);
        let key = self.redis_client.make_key(&counter_key(phone, bucket));
        let mut conn = self.redis_client.get_connection();

        let count: u64 = ctx
            .bounded(self.redis_client.response_timeout(), async {
                self.increment
                    .key(&key)
                    .arg(window_ms)
                    .invoke_async(&mut conn)
                    .await
                    .map_err(|e| redis_failure("rate counter increment", phone, e))
            })
            .await?;

        if count > self.limit {
            warn!(
                phone = %mask_phone(phone),
                attempts = count,
                limit = self.limit,
                "Rate limit exceeded"
            );
            return Ok(false);
        }

        debug!(phone = %mask_phone(phone), attempts = count, bucket, "Attempt admitted");
        Ok(true)
    }
}
