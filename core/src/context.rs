//! Per-operation context carrying the caller's deadline.
//!
//! Cancellation is expressed by dropping the operation's future; the
//! context only carries the deadline. Operations check it on entry, and
//! network-bound operations run under [`Context::bounded`], which enforces
//! the tighter of the caller's deadline and the backend's response budget.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::{OtpError, OtpResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    deadline: Option<Instant>,
}

impl Context {
    /// Context without a deadline
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// Context expiring `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fail fast when the deadline has already passed
    pub fn check(&self) -> OtpResult<()> {
        if self.is_expired() {
            Err(OtpError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Run a backend operation under this context and a response budget
    ///
    /// Elapsing the caller's deadline yields `DeadlineExceeded`; elapsing
    /// the backend budget first yields `BackendUnavailable`. No retries.
    pub async fn bounded<F, T>(&self, budget: Duration, operation: F) -> OtpResult<T>
    where
        F: Future<Output = OtpResult<T>>,
    {
        self.check()?;

        let budget_deadline = Instant::now() + budget;
        let (limit, caller_bound) = match self.deadline {
            Some(deadline) if deadline <= budget_deadline => (deadline, true),
            _ => (budget_deadline, false),
        };

        match tokio::time::timeout_at(limit, operation).await {
            Ok(result) => result,
            Err(_) if caller_bound => Err(OtpError::DeadlineExceeded),
            Err(_) => Err(OtpError::backend(format!(
                "no response within {}ms",
                budget.as_millis()
            ))),
        }
    }
}
