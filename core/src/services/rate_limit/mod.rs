//! Per-phone issuance rate limiting
//!
//! - `traits` - the `RateLimiter` capability shared by every backend
//! - `sliding_log` - exact sliding-window limiter kept in process memory

mod sliding_log;
mod traits;

#[cfg(test)]
mod tests;

pub use sliding_log::SlidingLogRateLimiter;
pub use traits::RateLimiter;
