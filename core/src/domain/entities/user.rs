//! User entity representing a phone-verified account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User registered on first successful OTP verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized phone number the account is bound to
    pub phone: String,

    /// Timestamp when the user was registered
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            registered_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("+15550102030");
        assert_eq!(user.phone, "+15550102030");
        assert!(user.registered_at <= Utc::now());
        assert_ne!(user.id, User::new("+15550102030").id);
    }
}
