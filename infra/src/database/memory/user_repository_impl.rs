use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use otp_core::domain::entities::user::User;
use otp_core::errors::{RepositoryError, RepositoryResult};
use otp_core::repositories::{UserFilter, UserRepository};
use otp_shared::utils::mask_phone;

#[derive(Default)]
struct UserTable {
    users: HashMap<Uuid, User>,
    by_phone: HashMap<String, Uuid>,
}

/// In-memory implementation of UserRepository
#[derive(Default)]
pub struct MemoryUserRepository {
    table: RwLock<UserTable>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<User> {
        let mut table = self.table.write().await;

        if table.by_phone.contains_key(&user.phone) {
            return Err(RepositoryError::Conflict {
                message: format!("user with phone {} already exists", mask_phone(&user.phone)),
            });
        }
        if table.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict {
                message: format!("user {} already exists", user.id),
            });
        }

        table.by_phone.insert(user.phone.clone(), user.id);
        table.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, phone = %mask_phone(&user.phone), "User created");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.table.read().await.users.get(&id).cloned())
    }

    async fn get_by_phone(&self, phone: &str) -> RepositoryResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .by_phone
            .get(phone)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn list(&self, filter: &UserFilter) -> RepositoryResult<(Vec<User>, usize)> {
        let table = self.table.read().await;
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&User> = table
            .users
            .values()
            .filter(|user| match &search {
                Some(needle) => user.phone.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect();
        // Stable order for paging
        matched.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matched.len();
        let page = matched
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
