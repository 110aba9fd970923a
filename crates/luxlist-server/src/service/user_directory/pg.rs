use luxlist_postgres::model::{NewUser, User};
use luxlist_postgres::query::UserRepository;
use luxlist_postgres::types::{ConstraintViolation, UserConstraints};
use luxlist_postgres::{PgClient, PgError};

use super::{UserDirectoryError, UserDirectoryResult, UserProvider};

/// Users stored in Postgres.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    client: PgClient,
}

impl PgUserDirectory {
    /// Creates a directory over the given pool.
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl UserProvider for PgUserDirectory {
    async fn find_by_name(&self, name: &str) -> UserDirectoryResult<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_user_by_name(name).await?)
    }

    async fn find_by_id(&self, user_id: i64) -> UserDirectoryResult<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_user_by_id(user_id).await?)
    }

    async fn create(&self, name: &str) -> UserDirectoryResult<User> {
        let mut conn = self.client.get_connection().await?;
        conn.create_user(NewUser::new(name))
            .await
            .map_err(|error: PgError| match error.constraint_violation() {
                Some(ConstraintViolation::User(UserConstraints::NameUnique)) => {
                    UserDirectoryError::NameTaken
                }
                _ => UserDirectoryError::Storage(error),
            })
    }
}
