//! Shared fixtures for HTTP tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use otp_api::AppState;
use otp_core::{
    Context, MemoryOtpStore, OtpError, OtpResult, OtpService, SlidingLogRateLimiter,
};
use otp_infra::database::MemoryUserRepository;
use otp_infra::BackendKind;
use otp_shared::JwtConfig;

pub const JWT_SECRET: &str = "test-secret";
pub const TTL: Duration = Duration::from_secs(120);

/// In-process store that remembers the last code issued per phone
pub struct RecordingOtp {
    inner: MemoryOtpStore,
    issued: Mutex<HashMap<String, String>>,
}

impl RecordingOtp {
    pub fn new() -> Self {
        Self {
            inner: MemoryOtpStore::new(TTL, Duration::from_secs(60)),
            issued: Mutex::new(HashMap::new()),
        }
    }

    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.issued.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl OtpService for RecordingOtp {
    async fn generate(&self, ctx: &Context, phone: &str) -> OtpResult<String> {
        let code = self.inner.generate(ctx, phone).await?;
        self.issued
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.clone());
        Ok(code)
    }

    async fn validate(&self, ctx: &Context, phone: &str, code: &str) -> OtpResult<bool> {
        self.inner.validate(ctx, phone, code).await
    }
}

/// Store whose backend is always down
pub struct UnavailableOtp;

#[async_trait]
impl OtpService for UnavailableOtp {
    async fn generate(&self, _ctx: &Context, _phone: &str) -> OtpResult<String> {
        Err(OtpError::backend("connection refused"))
    }

    async fn validate(&self, _ctx: &Context, _phone: &str, _code: &str) -> OtpResult<bool> {
        Err(OtpError::backend("connection refused"))
    }
}

pub fn state_with(otp: Arc<dyn OtpService>) -> web::Data<AppState> {
    web::Data::new(AppState {
        otp,
        limiter: Arc::new(SlidingLogRateLimiter::new(3, Duration::from_secs(600))),
        users: Arc::new(MemoryUserRepository::new()),
        backend: BackendKind::Memory,
        jwt: JwtConfig::new(JWT_SECRET),
        otp_ttl: TTL,
        request_timeout: Duration::from_secs(5),
    })
}
