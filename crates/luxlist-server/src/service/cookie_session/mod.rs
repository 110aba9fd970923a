//! Server-side cookie sessions.
//!
//! The `ss-token` cookie carries only an opaque id. The id references a
//! [`SessionRecord`] holding the user id and the access token, kept in a
//! [`SessionStoreProvider`] backend.

mod memory;
mod nats;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
pub use memory::MemorySessionStore;
pub use nats::NatsSessionStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::BoxedError;
use crate::utility::tracing_targets::TRACING_TARGET_SESSION;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "ss-token";

/// Path the session cookie is scoped to.
pub const SESSION_COOKIE_PATH: &str = "/api/v1";

/// Errors raised by a cookie session backend.
#[derive(Debug, thiserror::Error)]
pub enum CookieSessionError {
    /// The session record could not be written.
    #[error("session could not be persisted")]
    Persist(#[source] BoxedError),
    /// The backend could not be reached.
    #[error("session store is unavailable")]
    Unavailable(#[source] BoxedError),
}

/// Result type for cookie session operations.
pub type CookieSessionResult<T, E = CookieSessionError> = Result<T, E>;

/// Stored session record.
///
/// Both fields are optional on the wire so that a partial record decodes
/// and is then rejected by [`SessionRecord::into_data`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl SessionRecord {
    /// Creates a complete record.
    pub fn new(user_id: i64, access_token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            access_token: Some(access_token.into()),
        }
    }

    /// Returns the session data if both values are present.
    pub fn into_data(self) -> Option<SessionData> {
        match (self.user_id, self.access_token) {
            (Some(user_id), Some(access_token)) if !access_token.is_empty() => {
                Some(SessionData {
                    user_id,
                    access_token,
                })
            }
            _ => None,
        }
    }
}

/// User id and access token read from a cookie session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: i64,
    pub access_token: String,
}

impl fmt::Debug for SessionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionData")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Backend trait for session records.
#[async_trait::async_trait]
pub trait SessionStoreProvider: Send + Sync {
    /// Writes the record under `id`.
    async fn save(&self, id: Uuid, record: &SessionRecord) -> CookieSessionResult<()>;

    /// Reads the record under `id`.
    ///
    /// Missing, expired and undecodable records are all `Ok(None)`.
    async fn load(&self, id: Uuid) -> CookieSessionResult<Option<SessionRecord>>;

    /// Removes the record under `id`. Removing a missing record succeeds.
    async fn remove(&self, id: Uuid) -> CookieSessionResult<()>;
}

/// Cookie attributes.
#[derive(Debug, Clone, Copy)]
pub struct CookieSessionConfig {
    /// Whether the cookie is only sent over HTTPS.
    pub secure: bool,
    /// Lifetime of the cookie.
    pub max_age: Duration,
}

/// Cookie session service.
///
/// Every method takes and returns the request's [`CookieJar`]; the returned
/// jar must be part of the response for cookie changes to reach the client.
#[derive(Clone)]
pub struct CookieSessions {
    inner: Arc<dyn SessionStoreProvider>,
    config: CookieSessionConfig,
}

impl fmt::Debug for CookieSessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSessions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CookieSessions {
    /// Creates a new cookie session service from any provider.
    pub fn new<P>(provider: P, config: CookieSessionConfig) -> Self
    where
        P: SessionStoreProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
            config,
        }
    }

    /// Starts a session for `user_id` under a fresh id and sets the cookie.
    ///
    /// The record referenced by the incoming cookie, if any, is removed once
    /// the new one is written.
    ///
    /// # Errors
    ///
    /// Returns [`CookieSessionError::Persist`] if the record cannot be
    /// written; the jar is left untouched in that case.
    pub async fn start(
        &self,
        jar: CookieJar,
        user_id: i64,
        access_token: &str,
    ) -> CookieSessionResult<CookieJar> {
        let id = Uuid::new_v4();
        let record = SessionRecord::new(user_id, access_token);

        self.inner.save(id, &record).await.inspect_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                error = %error,
                "failed to persist cookie session"
            );
        })?;

        if let Some(previous) = session_id(&jar)
            && let Err(error) = self.inner.remove(previous).await
        {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                user_id = %user_id,
                error = %error,
                "failed to remove replaced cookie session"
            );
        }

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            user_id = %user_id,
            "cookie session started"
        );

        Ok(jar.add(self.session_cookie(id.to_string())))
    }

    /// Reads the session referenced by the request cookie.
    ///
    /// Returns `None` when the cookie is missing or malformed, or when the
    /// record is missing, partial or unreadable.
    pub async fn read(&self, jar: &CookieJar) -> Option<SessionData> {
        let id = session_id(jar)?;

        match self.inner.load(id).await {
            Ok(record) => record.and_then(SessionRecord::into_data),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    error = %error,
                    "failed to load cookie session"
                );
                None
            }
        }
    }

    /// Removes the session record and expires the cookie.
    ///
    /// Store failures are logged and otherwise ignored.
    pub async fn clear(&self, jar: CookieJar) -> CookieJar {
        if let Some(id) = session_id(&jar)
            && let Err(error) = self.inner.remove(id).await
        {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                error = %error,
                "failed to remove cookie session"
            );
        }

        jar.remove(Cookie::build(SESSION_COOKIE_NAME).path(SESSION_COOKIE_PATH))
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        let secs = i64::try_from(self.config.max_age.as_secs()).unwrap_or(i64::MAX);
        let max_age = time::Duration::seconds(secs);

        Cookie::build((SESSION_COOKIE_NAME, value))
            .path(SESSION_COOKIE_PATH)
            .max_age(max_age)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure)
            .build()
    }
}

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    let cookie = jar.get(SESSION_COOKIE_NAME)?;
    cookie.value().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> CookieSessions {
        let config = CookieSessionConfig {
            secure: false,
            max_age: Duration::from_secs(3600),
        };
        CookieSessions::new(MemorySessionStore::new(config.max_age), config)
    }

    fn request_jar(from: &CookieJar) -> CookieJar {
        let cookie = from.get(SESSION_COOKIE_NAME).unwrap().clone();
        CookieJar::new().add(cookie)
    }

    #[tokio::test]
    async fn start_sets_scoped_cookie() {
        let sessions = sessions();
        let jar = sessions.start(CookieJar::new(), 7, "token").await.unwrap();

        let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();
        assert!(cookie.value().parse::<Uuid>().is_ok());
        assert_eq!(cookie.path(), Some(SESSION_COOKIE_PATH));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[tokio::test]
    async fn oversized_max_age_saturates() {
        let config = CookieSessionConfig {
            secure: true,
            max_age: Duration::MAX,
        };
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let sessions = CookieSessions::new(store, config);
        let jar = sessions.start(CookieJar::new(), 7, "token").await.unwrap();

        let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(i64::MAX)));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[tokio::test]
    async fn read_returns_started_session() {
        let sessions = sessions();
        let jar = sessions.start(CookieJar::new(), 7, "token").await.unwrap();

        let data = sessions.read(&request_jar(&jar)).await.unwrap();
        assert_eq!(data.user_id, 7);
        assert_eq!(data.access_token, "token");
    }

    #[tokio::test]
    async fn read_without_cookie_is_empty() {
        assert!(sessions().read(&CookieJar::new()).await.is_none());

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "not-a-uuid"));
        assert!(sessions().read(&jar).await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_record() {
        let sessions = sessions();
        let jar = sessions.start(CookieJar::new(), 7, "token").await.unwrap();
        let jar = request_jar(&jar);

        let _jar = sessions.clear(jar.clone()).await;
        assert!(sessions.read(&jar).await.is_none());
    }

    #[tokio::test]
    async fn start_replaces_previous_record() {
        let sessions = sessions();
        let first = sessions.start(CookieJar::new(), 7, "first").await.unwrap();
        let first = request_jar(&first);

        let second = sessions.start(first.clone(), 7, "second").await.unwrap();
        assert!(sessions.read(&first).await.is_none());

        let data = sessions.read(&request_jar(&second)).await.unwrap();
        assert_eq!(data.access_token, "second");
    }

    #[test]
    fn partial_record_is_empty() {
        let record = SessionRecord {
            user_id: Some(1),
            access_token: None,
        };
        assert!(record.into_data().is_none());

        let record: SessionRecord = serde_json::from_str(r#"{"access_token":"t"}"#).unwrap();
        assert!(record.into_data().is_none());
    }

    #[test]
    fn debug_hides_token() {
        let data = SessionRecord::new(1, "secret-token").into_data().unwrap();
        assert!(!format!("{data:?}").contains("secret-token"));
    }
}
