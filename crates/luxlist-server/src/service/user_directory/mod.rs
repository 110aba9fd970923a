//! User lookup and registration used by login.
//!
//! Users are identified by name only. [`UserDirectory::find_or_register`]
//! implements the "log in or sign up" step, including the race where two
//! first logins for the same name run concurrently.

mod memory;
mod pg;

use std::fmt;
use std::sync::Arc;

use luxlist_postgres::PgError;
use luxlist_postgres::model::User;
pub use memory::MemoryUserDirectory;
pub use pg::PgUserDirectory;

use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// Errors raised by a user directory backend.
#[derive(Debug, thiserror::Error)]
pub enum UserDirectoryError {
    /// Another user already holds the name.
    #[error("user name is already taken")]
    NameTaken,
    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] PgError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T, E = UserDirectoryError> = Result<T, E>;

/// Backend trait for user storage.
#[async_trait::async_trait]
pub trait UserProvider: Send + Sync {
    /// Finds a user by exact name.
    async fn find_by_name(&self, name: &str) -> UserDirectoryResult<Option<User>>;

    /// Finds a user by id.
    async fn find_by_id(&self, user_id: i64) -> UserDirectoryResult<Option<User>>;

    /// Registers a user, failing with [`UserDirectoryError::NameTaken`] on
    /// a duplicate name.
    async fn create(&self, name: &str) -> UserDirectoryResult<User>;
}

/// User directory service.
#[derive(Clone)]
pub struct UserDirectory {
    inner: Arc<dyn UserProvider>,
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}

impl UserDirectory {
    /// Creates a new user directory from any provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: UserProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Finds a user by id.
    pub async fn find_by_id(&self, user_id: i64) -> UserDirectoryResult<Option<User>> {
        self.inner.find_by_id(user_id).await
    }

    /// Returns the user named `name`, registering it first if needed.
    ///
    /// The flag is `true` when the user was created by this call. `name`
    /// must already be trimmed and non-empty.
    pub async fn find_or_register(&self, name: &str) -> UserDirectoryResult<(User, bool)> {
        if let Some(user) = self.inner.find_by_name(name).await? {
            return Ok((user, false));
        }

        match self.inner.create(name).await {
            Ok(user) => {
                tracing::info!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    user_id = %user.id,
                    "new user registered"
                );
                Ok((user, true))
            }
            Err(UserDirectoryError::NameTaken) => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    "concurrent registration, reading existing user"
                );
                let user = self
                    .inner
                    .find_by_name(name)
                    .await?
                    .ok_or(UserDirectoryError::NameTaken)?;
                Ok((user, false))
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registers_once_then_reuses() {
        let users = UserDirectory::new(MemoryUserDirectory::new());

        let (first, created) = users.find_or_register("alice").await.unwrap();
        assert!(created);
        assert_eq!(first.id, 1);

        let (second, created) = users.find_or_register("alice").await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);

        let (bob, created) = users.find_or_register("bob").await.unwrap();
        assert!(created);
        assert_eq!(bob.id, 2);
    }

    /// Reports every name as unknown on the first lookup, as if another
    /// request registered it in between.
    struct RacingProvider {
        inner: MemoryUserDirectory,
        lookups: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl UserProvider for RacingProvider {
        async fn find_by_name(&self, name: &str) -> UserDirectoryResult<Option<User>> {
            use std::sync::atomic::Ordering;
            if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(None);
            }
            self.inner.find_by_name(name).await
        }

        async fn find_by_id(&self, user_id: i64) -> UserDirectoryResult<Option<User>> {
            self.inner.find_by_id(user_id).await
        }

        async fn create(&self, name: &str) -> UserDirectoryResult<User> {
            self.inner.create(name).await
        }
    }

    #[tokio::test]
    async fn registration_race_reads_existing_user() {
        let inner = MemoryUserDirectory::new();
        let existing = inner.create("alice").await.unwrap();

        let users = UserDirectory::new(RacingProvider {
            inner,
            lookups: Default::default(),
        });

        let (user, created) = users.find_or_register("alice").await.unwrap();
        assert!(!created);
        assert_eq!(user.id, existing.id);
    }
}
