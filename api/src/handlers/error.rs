//! Mapping of service failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use otp_core::errors::{OtpError, RepositoryError};

use crate::dto::ErrorResponse;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Too many OTP requests, try again later")]
    RateLimited,

    /// Covers missing, expired and mismatched codes alike
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Service temporarily unavailable")]
    ServiceUnavailable(String),

    #[error("An internal error occurred")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::RateLimited => "rate_limited",
            ApiError::InvalidOrExpiredCode => "invalid_or_expired",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidOrExpiredCode | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Details of 5xx failures stay in the logs
        match self {
            ApiError::ServiceUnavailable(detail) | ApiError::Internal(detail) => {
                error!(code = self.code(), "Request failed: {}", detail);
            }
            _ => {}
        }
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.code(), self.to_string()))
    }
}

impl From<OtpError> for ApiError {
    fn from(error: OtpError) -> Self {
        match error {
            OtpError::BackendUnavailable { .. } | OtpError::DeadlineExceeded => {
                ApiError::ServiceUnavailable(error.to_string())
            }
            OtpError::RandomSource { .. } => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { resource } => {
                ApiError::NotFound(format!("{} not found", resource))
            }
            RepositoryError::Conflict { .. } | RepositoryError::Internal { .. } => {
                ApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}
