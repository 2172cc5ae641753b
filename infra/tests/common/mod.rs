//! Behaviour every OTP store and rate limiter backend must share
//!
//! Each check takes the capability as a trait object so the same assertions
//! run against the in-process and the Redis backends. Time-dependent checks
//! sleep on the tokio clock: paused for the in-process backends, real for
//! Redis.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use otp_core::{Context, OtpService, RateLimiter};
use uuid::Uuid;

/// A phone identifier no other test run has used
pub fn unique_phone() -> String {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(10)
        .collect();
    format!("+1{}", digits)
}

fn different_code(code: &str) -> String {
    if code == "000000" {
        "000001".to_string()
    } else {
        "000000".to_string()
    }
}

pub async fn otp_validates_once(otp: &dyn OtpService) {
    let ctx = Context::background();
    let phone = unique_phone();

    let code = otp.generate(&ctx, &phone).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_digit()));

    assert!(otp.validate(&ctx, &phone, &code).await.unwrap());
    assert!(!otp.validate(&ctx, &phone, &code).await.unwrap());
}

pub async fn otp_wrong_code_keeps_record(otp: &dyn OtpService) {
    let ctx = Context::background();
    let phone = unique_phone();

    let code = otp.generate(&ctx, &phone).await.unwrap();
    assert!(!otp.validate(&ctx, &phone, &different_code(&code)).await.unwrap());
    assert!(!otp.validate(&ctx, &phone, "not-a-code").await.unwrap());
    assert!(otp.validate(&ctx, &phone, &code).await.unwrap());
}

pub async fn otp_unknown_phone_is_false(otp: &dyn OtpService) {
    let ctx = Context::background();
    assert!(!otp.validate(&ctx, &unique_phone(), "123456").await.unwrap());
}

pub async fn otp_regenerate_replaces_code(otp: &dyn OtpService) {
    let ctx = Context::background();
    let phone = unique_phone();

    let mut first = otp.generate(&ctx, &phone).await.unwrap();
    let mut second = otp.generate(&ctx, &phone).await.unwrap();
    while first == second {
        first = second;
        second = otp.generate(&ctx, &phone).await.unwrap();
    }

    assert!(!otp.validate(&ctx, &phone, &first).await.unwrap());
    assert!(otp.validate(&ctx, &phone, &second).await.unwrap());
}

/// `otp` must have been built with `ttl`
pub async fn otp_expires_after_ttl(otp: &dyn OtpService, ttl: Duration) {
    let ctx = Context::background();
    let phone = unique_phone();

    let code = otp.generate(&ctx, &phone).await.unwrap();
    tokio::time::sleep(ttl + Duration::from_millis(100)).await;
    assert!(!otp.validate(&ctx, &phone, &code).await.unwrap());
}

pub async fn otp_concurrent_validate_single_winner(otp: Arc<dyn OtpService>, contenders: usize) {
    let phone = unique_phone();
    let code = otp.generate(&Context::background(), &phone).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..contenders {
        let otp = otp.clone();
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

/// `limiter` must allow 3 attempts per window
pub async fn limiter_rejects_fourth_attempt(limiter: &dyn RateLimiter) {
    let ctx = Context::background();
    let phone = unique_phone();

    let mut results = Vec::new();
    for _ in 0..4 {
        results.push(limiter.allow(&ctx, &phone).await.unwrap());
    }
    assert_eq!(results, vec![true, true, true, false]);
}

/// `limiter` must allow 3 attempts per `window`
pub async fn limiter_readmits_after_window(limiter: &dyn RateLimiter, window: Duration) {
    let ctx = Context::background();
    let phone = unique_phone();

    for _ in 0..3 {
        assert!(limiter.allow(&ctx, &phone).await.unwrap());
    }
    assert!(!limiter.allow(&ctx, &phone).await.unwrap());

    tokio::time::sleep(window + Duration::from_millis(50)).await;
    assert!(limiter.allow(&ctx, &phone).await.unwrap());
}

pub async fn limiter_phones_independent(limiter: &dyn RateLimiter) {
    let ctx = Context::background();
    let busy = unique_phone();
    let quiet = unique_phone();

    for _ in 0..3 {
        limiter.allow(&ctx, &busy).await.unwrap();
    }
    assert!(!limiter.allow(&ctx, &busy).await.unwrap());
    assert!(limiter.allow(&ctx, &quiet).await.unwrap());
}

/// Generate, validate, validate again: the second validation fails
pub async fn end_to_end(otp: &dyn OtpService, limiter: &dyn RateLimiter) {
    let ctx = Context::background();
    let phone = unique_phone();

    assert!(limiter.allow(&ctx, &phone).await.unwrap());
    let code = otp.generate(&ctx, &phone).await.unwrap();
    assert!(otp.validate(&ctx, &phone, &code).await.unwrap());
    assert!(!otp.validate(&ctx, &phone, &code).await.unwrap());
}
