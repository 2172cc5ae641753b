//! Authentication route handlers
//!
//! - `request_otp` - rate-limited issuance of a one-time passcode
//! - `verify_otp` - passcode check, registration on first login, token issuance

pub mod request_otp;
pub mod verify_otp;

pub use request_otp::request_otp;
pub use verify_otp::verify_otp;

use otp_shared::phone::{is_valid_phone, normalize_phone_number};

use crate::handlers::ApiError;

/// Validate and normalize a submitted phone number
pub(crate) fn parse_phone(raw: &str) -> Result<String, ApiError> {
    if !is_valid_phone(raw) {
        return Err(ApiError::Validation(
            "Phone number must have 8-15 digits with an optional leading '+'".to_string(),
        ));
    }
    Ok(normalize_phone_number(raw))
}
