//! Backend conformance checks against the in-process implementations

mod common;

use std::sync::Arc;
use std::time::Duration;

use otp_core::{MemoryOtpStore, OtpService, SlidingLogRateLimiter};

const TTL: Duration = Duration::from_secs(120);
const WINDOW: Duration = Duration::from_secs(600);

fn store() -> MemoryOtpStore {
    MemoryOtpStore::new(TTL, Duration::from_secs(60))
}

fn limiter() -> SlidingLogRateLimiter {
    SlidingLogRateLimiter::new(3, WINDOW)
}

#[tokio::test(start_paused = true)]
async fn memory_otp_validates_once() {
    common::otp_validates_once(&store()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_otp_wrong_code_keeps_record() {
    common::otp_wrong_code_keeps_record(&store()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_otp_unknown_phone() {
    common::otp_unknown_phone_is_false(&store()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_otp_regenerate_replaces_code() {
    common::otp_regenerate_replaces_code(&store()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_otp_expires_after_ttl() {
    common::otp_expires_after_ttl(&store(), TTL).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_otp_concurrent_validate() {
    let otp: Arc<dyn OtpService> = Arc::new(store());
    common::otp_concurrent_validate_single_winner(otp, 16).await;
}

#[tokio::test(start_paused = true)]
async fn memory_limiter_rejects_fourth_attempt() {
    common::limiter_rejects_fourth_attempt(&limiter()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_limiter_readmits_after_window() {
    common::limiter_readmits_after_window(&limiter(), WINDOW).await;
}

#[tokio::test(start_paused = true)]
async fn memory_limiter_phones_independent() {
    common::limiter_phones_independent(&limiter()).await;
}

#[tokio::test(start_paused = true)]
async fn memory_end_to_end() {
    common::end_to_end(&store(), &limiter()).await;
}
