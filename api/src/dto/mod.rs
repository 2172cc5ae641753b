//! Request and response bodies

pub mod auth;
pub mod error;
pub mod user;

pub use auth::{RequestOtpRequest, RequestOtpResponse, TokenResponse, VerifyOtpRequest};
pub use error::ErrorResponse;
pub use user::{ListUsersQuery, UserListResponse, UserResponse};
