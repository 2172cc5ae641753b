//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use otp_core::User;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            registered_at: user.registered_at,
        }
    }
}

/// Query string of `GET /api/v1/users`
///
/// `page` is 1-based. Out-of-range values fall back to the first page and
/// the default size rather than being rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl ListUsersQuery {
    pub fn page(&self) -> usize {
        match self.page {
            Some(page) if page >= 1 => page as usize,
            _ => 1,
        }
    }

    /// Page size, `DEFAULT_PAGE_SIZE` unless within `1..=MAX_PAGE_SIZE`
    pub fn size(&self) -> usize {
        match self.size {
            Some(size) if (1..=MAX_PAGE_SIZE as i64).contains(&size) => size as usize,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.size())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}
