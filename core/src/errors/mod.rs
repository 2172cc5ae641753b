//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of the OTP store and rate limiter capabilities
///
/// A rejected attempt or a wrong, missing or expired code is not an error:
/// those surface as `Ok(false)`.
#[derive(Error, Debug)]
pub enum OtpError {
    /// The secure random source failed; fatal to the single generation call
    #[error("Random source failure: {message}")]
    RandomSource { message: String },

    /// The shared store could not be reached or answered with an error
    #[error("Backend unavailable: {message}")]
    BackendUnavailable { message: String },

    /// The caller's context deadline elapsed before the operation finished
    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

impl OtpError {
    pub fn backend(message: impl Into<String>) -> Self {
        OtpError::BackendUnavailable {
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably retry the same operation
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OtpError::BackendUnavailable { .. } | OtpError::DeadlineExceeded
        )
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

/// User repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(OtpError::backend("connection refused").is_retryable());
        assert!(OtpError::DeadlineExceeded.is_retryable());
        assert!(!OtpError::RandomSource {
            message: "entropy".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OtpError::backend("timed out").to_string(),
            "Backend unavailable: timed out"
        );
        assert_eq!(
            RepositoryError::NotFound {
                resource: "user 42".to_string()
            }
            .to_string(),
            "Resource not found: user 42"
        );
    }
}
