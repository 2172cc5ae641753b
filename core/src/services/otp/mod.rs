//! One-time passcode lifecycle
//!
//! - `generator` - 6-digit codes from the OS random source
//! - `traits` - the `OtpService` capability shared by every backend
//! - `memory` - the in-process store with its own expiry sweeper

mod generator;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use generator::{generate_code, generate_code_with};
pub use memory::MemoryOtpStore;
pub use traits::OtpService;
