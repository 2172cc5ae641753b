//! One-time passcode configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OTP issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Interval between expiry sweeps of the in-process store, in seconds
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl OtpConfig {
    /// Code time-to-live
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Sweep interval for the in-process store
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

fn default_ttl_seconds() -> u64 {
    120 // 2 minutes
}

fn default_sweep_interval_seconds() -> u64 {
    60
}
