//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod otp;
pub mod rate_limit;

// Re-export commonly used types
pub use cleanup::{ExpirySweeper, Sweep};
pub use otp::{generate_code, generate_code_with, MemoryOtpStore, OtpService};
pub use rate_limit::{RateLimiter, SlidingLogRateLimiter};
