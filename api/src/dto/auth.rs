//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponse;

/// Body of `POST /api/v1/auth/request-otp`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RequestOtpRequest {
    /// Phone number, formatting characters allowed
    #[validate(length(min = 8, max = 32, message = "Phone number must be 8-32 characters"))]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestOtpResponse {
    pub message: String,
    /// Seconds until the issued code expires
    pub expires_in: u64,
}

/// Body of `POST /api/v1/auth/verify-otp`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 8, max = 32, message = "Phone number must be 8-32 characters"))]
    pub phone: String,

    #[validate(length(min = 1, max = 16, message = "Code must be 1-16 characters"))]
    pub code: String,
}

/// Issued access token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
    /// Whether this verification created the account
    pub registered: bool,
}
