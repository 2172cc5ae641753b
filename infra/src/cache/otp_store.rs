//! Shared OTP store backed by Redis
//!
//! Codes live under `otp:code:{phone}` with a native TTL. Issuing always
//! overwrites; validation is a single compare-and-delete script so that of
//! several concurrent validators, across processes, at most one succeeds.

use async_trait::async_trait;
use redis::Script;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use otp_core::{generate_code, is_well_formed_code, Context, OtpError, OtpResult, OtpService};
use otp_shared::utils::mask_phone;

use crate::cache::redis_client::RedisClient;

const CODE_KEY_PREFIX: &str = "otp:code";

/// Deletes the key only when it holds the submitted code
const CONSUME_SCRIPT: &str = r#"
local stored = redis.call('GET', KEYS[1])
if stored and stored == ARGV[1] then
    redis.call('DEL', KEYS[1])
    return 1
end
return 0
"#;

/// Redis-backed implementation of [`OtpService`]
pub struct RedisOtpStore {
    redis_client: Arc<RedisClient>,
    ttl: Duration,
    consume: Script,
}

impl RedisOtpStore {
    pub fn new(redis_client: Arc<RedisClient>, ttl: Duration) -> Self {
        Self {
            redis_client,
            ttl,
            consume: Script::new(CONSUME_SCRIPT),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn key(&self, phone: &str) -> String {
        self.redis_client.make_key(&code_key(phone))
    }
}

/// Unprefixed key holding the live code for a phone
pub(crate) fn code_key(phone: &str) -> String {
    format!("{}:{}", CODE_KEY_PREFIX, phone)
}

pub(crate) fn redis_failure(operation: &str, phone: &str, e: redis::RedisError) -> OtpError {
    error!(phone = %mask_phone(phone), "Redis {} failed: {}", operation, e);
    OtpError::backend(format!("redis {} failed: {}", operation, e))
}

#[async_trait]
impl OtpService for RedisOtpStore {
    async fn generate(&self, ctx: &Context, phone: &str) -> OtpResult<String> {
        ctx.check()?;

        let code = generate_code()?;
        let key = self.key(phone);
        // PX takes at least one millisecond
        let ttl_ms = (self.ttl.as_millis() as u64).max(1);
        let mut conn = self.redis_client.get_connection();

        ctx.bounded(self.redis_client.response_timeout(), async {
            redis::cmd("SET")
                .arg(&key)
                .arg(&code)
                .arg("PX")
                .arg(ttl_ms)
                .query_async::<_, ()>(&mut conn)
                .await
                .map_err(|e| redis_failure("SET", phone, e))
        })
        .await?;

        info!(
            target: "otp_delivery",
            phone = %phone,
            code = %code,
            ttl_secs = self.ttl.as_secs(),
            "one-time passcode issued"
        );
        Ok(code)
    }

    async fn validate(&self, ctx: &Context, phone: &str, code: &str) -> OtpResult<bool> {
        ctx.check()?;

        if !is_well_formed_code(code) {
            debug!(phone = %mask_phone(phone), "Rejected malformed code");
            return Ok(false);
        }

        let key = self.key(phone);
        let mut conn = self.redis_client.get_connection();

        let consumed: i64 = ctx
            .bounded(self.redis_client.response_timeout(), async {
                self.consume
                    .key(&key)
                    .arg(code)
                    .invoke_async(&mut conn)
                    .await
                    .map_err(|e| redis_failure("compare-and-delete", phone, e))
            })
            .await?;

        if consumed == 1 {
            info!(phone = %mask_phone(phone), "One-time passcode consumed");
            Ok(true)
        } else {
            debug!(phone = %mask_phone(phone), "No matching live code");
            Ok(false)
        }
    }
}
