use std::sync::Arc;

use jiff::Timestamp;
use luxlist_postgres::model::User;
use tokio::sync::RwLock;

use super::{UserDirectoryError, UserDirectoryResult, UserProvider};

/// In-process user directory with sequential ids starting at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserProvider for MemoryUserDirectory {
    async fn find_by_name(&self, name: &str) -> UserDirectoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.name == name).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> UserDirectoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn create(&self, name: &str) -> UserDirectoryResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.name == name) {
            return Err(UserDirectoryError::NameTaken);
        }

        let user = User {
            id: users.len() as i64 + 1,
            name: name.to_owned(),
            created_at: Timestamp::now().into(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
