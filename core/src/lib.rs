//! # OTP Core
//!
//! Core business logic for phone one-time passcodes.
//! This crate contains the error taxonomy, the operation context, domain
//! entities, the code generator, the `OtpService` and `RateLimiter`
//! capability traits with their in-process implementations, and the
//! repository interfaces consumed by the service layer.

pub mod context;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use context::Context;
pub use domain::{is_well_formed_code, OtpRecord, User, CODE_LENGTH};
pub use errors::*;
pub use repositories::{UserFilter, UserRepository};
pub use services::*;
