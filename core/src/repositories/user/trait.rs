//! User repository trait defining the interface for user data persistence.
//!
//! The OTP flow only needs a plain keyed store: create on first verification,
//! look up by id or phone, and a filtered listing for the user endpoints.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::RepositoryResult;

/// Listing filter with substring search on the phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring matched against the phone
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            search: None,
            limit: 20,
            offset: 0,
        }
    }
}

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - A user with the same phone exists
    async fn create(&self, user: User) -> RepositoryResult<User>;

    /// Find a user by their unique identifier
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find a user by phone number
    async fn get_by_phone(&self, phone: &str) -> RepositoryResult<Option<User>>;

    /// List users matching the filter, with the total count before paging
    async fn list(&self, filter: &UserFilter) -> RepositoryResult<(Vec<User>, usize)>;
}
