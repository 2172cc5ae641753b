//! Backend conformance checks against a live Redis server
//!
//! Run with `cargo test -p otp_infra -- --ignored`; `REDIS_URL` defaults to
//! `redis://127.0.0.1:6379`.

mod common;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use otp_core::{Context, OtpError, OtpService, RateLimiter};
use otp_infra::cache::{CacheConfig, RedisClient, RedisOtpStore};
use otp_infra::services::RedisRateLimiter;

const TTL: Duration = Duration::from_secs(1);
const WINDOW: Duration = Duration::from_secs(2);

async fn client() -> Arc<RedisClient> {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let config = CacheConfig::new(url).with_prefix("otp-conformance");
    Arc::new(RedisClient::new(config).await.unwrap())
}

async fn store() -> RedisOtpStore {
    RedisOtpStore::new(client().await, TTL)
}

async fn limiter() -> RedisRateLimiter {
    RedisRateLimiter::new(client().await, 3, WINDOW)
}

/// Sleep until just after the next fixed-window boundary
async fn align_to_window(window: Duration) {
    let window_ms = window.as_millis() as i64;
    let into_bucket = Utc::now().timestamp_millis().rem_euclid(window_ms);
    let wait = (window_ms - into_bucket + 20) as u64;
    tokio::time::sleep(Duration::from_millis(wait)).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_otp_validates_once() {
    common::otp_validates_once(&store().await).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_otp_wrong_code_keeps_record() {
    common::otp_wrong_code_keeps_record(&store().await).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_otp_unknown_phone() {
    common::otp_unknown_phone_is_false(&store().await).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_otp_regenerate_replaces_code() {
    common::otp_regenerate_replaces_code(&store().await).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_otp_expires_after_ttl() {
    common::otp_expires_after_ttl(&store().await, TTL).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires actual Redis server
async fn redis_otp_concurrent_validate() {
    let otp: Arc<dyn OtpService> = Arc::new(store().await);
    common::otp_concurrent_validate_single_winner(otp, 32).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires actual Redis server
async fn redis_otp_concurrent_validate_across_clients() {
    // Separate connections stand in for separate server processes
    let phone = common::unique_phone();
    let issuer = store().await;
    let code = issuer.generate(&Context::background(), &phone).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let otp = store().await;
        let phone = phone.clone();
        let code = code.clone();
        tasks.spawn(async move {
            otp.validate(&Context::background(), &phone, &code)
                .await
                .unwrap()
        });
    }

    let mut successes = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_limiter_rejects_fourth_attempt() {
    let limiter = limiter().await;
    align_to_window(WINDOW).await;
    common::limiter_rejects_fourth_attempt(&limiter).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_limiter_readmits_after_window() {
    let limiter = limiter().await;
    align_to_window(WINDOW).await;
    common::limiter_readmits_after_window(&limiter, WINDOW).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_limiter_phones_independent() {
    let limiter = limiter().await;
    align_to_window(WINDOW).await;
    common::limiter_phones_independent(&limiter).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_end_to_end() {
    let store = store().await;
    let limiter = limiter().await;
    common::end_to_end(&store, &limiter).await;
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn redis_expired_context_is_deadline_error() {
    let store = store().await;
    let ctx = Context::with_timeout(Duration::ZERO);

    let result = store.generate(&ctx, &common::unique_phone()).await;
    assert!(matches!(result, Err(OtpError::DeadlineExceeded)));

    let limiter = limiter().await;
    let result = limiter.allow(&ctx, &common::unique_phone()).await;
    assert!(matches!(result, Err(OtpError::DeadlineExceeded)));
}
