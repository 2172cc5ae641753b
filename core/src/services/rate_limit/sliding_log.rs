//! Sliding-log rate limiter

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;
#[cfg(test)]
use tokio::sync::MutexGuard;
use tokio::time::Instant;
use tracing::{debug, warn};

use otp_shared::utils::mask_phone;
use otp_shared::RateLimitConfig;

use super::traits::RateLimiter;
use crate::context::Context;
use crate::errors::OtpResult;
use crate::services::cleanup::Sweep;

/// Exact sliding-window limiter
///
/// Keeps every admitted attempt time per phone and admits at most `limit`
/// attempts in any trailing `window`. Rejected attempts are not recorded.
pub struct SlidingLogRateLimiter {
    limit: usize,
    window: Duration,
    logs: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingLogRateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            logs: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_attempts as usize, config.window())
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Attempts still counted against `phone`
    pub async fn attempts(&self, phone: &str) -> usize {
        let mut logs = self.logs.lock().await;
        let now = Instant::now();
        match logs.get_mut(phone) {
            Some(log) => {
                self.prune(log, now);
                log.len()
            }
            None => 0,
        }
    }

    /// Number of phones with a log, including fully aged-out ones
    pub async fn tracked_phones(&self) -> usize {
        self.logs.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn lock_logs(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Instant>>> {
        self.logs.lock().await
    }

    /// Drop attempts at or before `now - window`
    fn prune(&self, log: &mut VecDeque<Instant>, now: Instant) {
        // Before the window has elapsed since process start nothing can be stale
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        while log.front().is_some_and(|&t| t <= cutoff) {
            log.pop_front();
        }
    }
}

#[async_trait]
impl RateLimiter for SlidingLogRateLimiter {
    async fn allow(&self, ctx: &Context, phone: &str) -> OtpResult<bool> {
        ctx.check()?;

        let mut logs = self.logs.lock().await;
        let now = Instant::now();
        let log = logs.entry(phone.to_string()).or_default();
        self.prune(log, now);

        if log.len() >= self.limit {
            warn!(
                phone = %mask_phone(phone),
                attempts = log.len(),
                limit = self.limit,
                "Rate limit exceeded"
            );
            return Ok(false);
        }

        log.push_back(now);
        debug!(phone = %mask_phone(phone), attempts = log.len(), "Attempt admitted");
        Ok(true)
    }
}

#[async_trait]
impl Sweep for SlidingLogRateLimiter {
    fn name(&self) -> &'static str {
        "sliding_log_limiter"
    }

    async fn sweep_expired(&self) -> usize {
        let mut logs = self.logs.lock().await;
        let now = Instant::now();
        let before = logs.len();
        logs.retain(|_, log| {
            self.prune(log, now);
            !log.is_empty()
        });
        before - logs.len()
    }
}
