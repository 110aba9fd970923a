//! Session cache: the single currently-valid token per user.
//!
//! This module provides:
//! - [`SessionCacheProvider`]: backend trait for the cache
//! - [`SessionCache`]: service wrapper with logging, held in the state
//! - [`NatsSessionCache`] and [`MemorySessionCache`]: the two backends
//!
//! Writing a user's entry replaces the previous token, which is what makes a
//! new login invalidate every earlier one.

mod memory;
mod nats;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

pub use memory::MemorySessionCache;
pub use nats::NatsSessionCache;

use crate::BoxedError;
use crate::utility::tracing_targets::TRACING_TARGET_SESSION;

/// Errors raised by a session cache backend.
#[derive(Debug, thiserror::Error)]
pub enum SessionCacheError {
    /// The backend could not be reached or returned unusable data.
    #[error("session cache is unavailable")]
    Unavailable(#[source] BoxedError),
}

impl SessionCacheError {
    /// Wraps a backend error.
    pub fn unavailable(source: impl Into<BoxedError>) -> Self {
        Self::Unavailable(source.into())
    }
}

/// Result type for session cache operations.
pub type SessionCacheResult<T, E = SessionCacheError> = Result<T, E>;

/// Backend trait for the session cache.
///
/// `get` distinguishes a missing entry (`Ok(None)`) from an unreachable
/// backend (`Err`).
#[async_trait::async_trait]
pub trait SessionCacheProvider: Send + Sync {
    /// Stores `token` as the only valid token of `user_id`, restarting the TTL.
    async fn set(&self, user_id: i64, token: &str) -> SessionCacheResult<()>;

    /// Returns the current token of `user_id`, if any and not expired.
    async fn get(&self, user_id: i64) -> SessionCacheResult<Option<String>>;

    /// Removes the entry of `user_id`. Removing a missing entry succeeds.
    async fn delete(&self, user_id: i64) -> SessionCacheResult<()>;
}

/// Session cache service with logging.
///
/// The provider is wrapped in an `Arc` for cheap cloning.
#[derive(Clone)]
pub struct SessionCache {
    inner: Arc<dyn SessionCacheProvider>,
}

impl fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache").finish_non_exhaustive()
    }
}

impl SessionCache {
    /// Creates a new session cache from any provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: SessionCacheProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Stores `token` as the only valid token of `user_id`.
    pub async fn set(&self, user_id: i64, token: &str) -> SessionCacheResult<()> {
        let started_at = Instant::now();
        let result = self.inner.set(user_id, token).await;

        match &result {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                elapsed_ms = started_at.elapsed().as_millis(),
                "session cache entry written"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                error = %error,
                "failed to write session cache entry"
            ),
        }

        result
    }

    /// Returns the current token of `user_id`.
    pub async fn get(&self, user_id: i64) -> SessionCacheResult<Option<String>> {
        let result = self.inner.get(user_id).await;

        match &result {
            Ok(token) => tracing::trace!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                found = token.is_some(),
                "session cache entry read"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                error = %error,
                "failed to read session cache entry"
            ),
        }

        result
    }

    /// Removes the entry of `user_id`.
    pub async fn delete(&self, user_id: i64) -> SessionCacheResult<()> {
        let result = self.inner.delete(user_id).await;

        match &result {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                "session cache entry deleted"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                error = %error,
                "failed to delete session cache entry"
            ),
        }

        result
    }
}
