//! One-time passcode record held by the in-process store.

use constant_time_eq::constant_time_eq;
use std::time::Duration;
use tokio::time::Instant;

/// Length of a passcode
pub const CODE_LENGTH: usize = 6;

/// A live passcode for one phone
///
/// Expiry uses the tokio clock so paused-time tests can move past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// The 6-digit code
    pub code: String,

    /// Instant from which the code is no longer accepted
    pub expires_at: Instant,
}

impl OtpRecord {
    /// Creates a record expiring `ttl` from now
    pub fn issue(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    /// The expiry instant itself already counts as expired
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}

/// Whether `code` has the shape of an issued passcode (6 ASCII digits)
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
