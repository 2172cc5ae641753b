//! In-process OTP store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
#[cfg(test)]
use tokio::sync::MutexGuard;
use tokio::time::Instant;
use tracing::{debug, info};

use otp_shared::utils::mask_phone;

use super::generator::generate_code;
use super::traits::OtpService;
use crate::context::Context;
use crate::domain::entities::{is_well_formed_code, OtpRecord};
use crate::errors::OtpResult;
use crate::services::cleanup::{ExpirySweeper, Sweep};

#[derive(Debug, Default)]
struct RecordTable {
    records: Mutex<HashMap<String, OtpRecord>>,
}

#[async_trait]
impl Sweep for RecordTable {
    fn name(&self) -> &'static str {
        "memory_otp"
    }

    async fn sweep_expired(&self) -> usize {
        let mut records = self.records.lock().await;
        let now = Instant::now();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        before - records.len()
    }
}

/// Single-process OTP store guarded by one mutex
///
/// Expiry is checked on every validation; the owned sweeper only bounds
/// memory held by codes nobody came back for.
pub struct MemoryOtpStore {
    table: Arc<RecordTable>,
    ttl: Duration,
    sweeper: ExpirySweeper,
}

impl MemoryOtpStore {
    /// Create a store and start its sweeper
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        let table = Arc::new(RecordTable::default());
        let sweeper = ExpirySweeper::spawn(table.clone(), sweep_interval);
        Self {
            table,
            ttl,
            sweeper,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of records currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.table.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired records now rather than waiting for the next tick
    pub async fn sweep_expired(&self) -> usize {
        self.table.sweep_expired().await
    }

    /// Stop the background sweeper
    pub async fn shutdown(&self) {
        self.sweeper.shutdown().await;
    }

    #[cfg(test)]
    pub(crate) async fn lock_records(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        self.table.records.lock().await
    }
}

#[async_trait]
impl OtpService for MemoryOtpStore {
    async fn generate(&self, ctx: &Context, phone: &str) -> OtpResult<String> {
        ctx.check()?;

        let code = generate_code()?;
        {
            let mut records = self.table.records.lock().await;
            // Lifetime starts once the record is visible
            records.insert(phone.to_string(), OtpRecord::issue(code.clone(), self.ttl));
        }

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

        // Clock is read under the lock so a wait cannot stale it
        let mut records = self.table.records.lock().await;
        let now = Instant::now();

        let Some(record) = records.get(phone) else {
            debug!(phone = %mask_phone(phone), "No live code");
            return Ok(false);
        };

        if record.is_expired_at(now) {
            records.remove(phone);
            debug!(phone = %mask_phone(phone), "Code expired");
            return Ok(false);
        }

        if !record.matches(code) {
            debug!(phone = %mask_phone(phone), "Code mismatch");
            return Ok(false);
        }

        records.remove(phone);
        info!(phone = %mask_phone(phone), "One-time passcode consumed");
        Ok(true)
    }
}
