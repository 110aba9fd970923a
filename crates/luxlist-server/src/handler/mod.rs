//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use luxlist_server::handler::routes;
//! use luxlist_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::builder()
//!     .with_jwt_secret("a-development-secret-of-32-bytes!")
//!     .build()?;
//! let state = ServiceState::from_config(&config).await?;
//!
//! // Every route is served under `/api/v1`.
//! let router = routes(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod monitors;
mod request;
mod response;
mod tags;
mod tasks;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

/// Prefix every route is nested under.
pub const API_PREFIX: &str = "/api/v1";

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes behind the authentication gate.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(authentication::private_routes())
        .merge(tasks::routes())
        .merge(tags::routes())
        .with_authentication(state)
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::public_routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with all routes, nested under [`API_PREFIX`].
///
/// Unknown paths answer with a JSON 404.
pub fn routes(state: ServiceState) -> Router {
    let api = Router::new()
        .merge(private_routes(state.clone()))
        .merge(public_routes());

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(handler)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    use crate::handler::routes;
    use crate::service::{
        CookieSessionError, MemorySessionCache, SESSION_COOKIE_NAME, ServiceConfig,
        ServiceState, SessionCacheError, SessionCacheProvider, SessionRecord,
        SessionStoreProvider,
    };

    /// Secret used to sign tokens in tests.
    pub const TEST_SECRET: &str = "a-test-secret-that-is-long-enough!";

    /// Returns in-memory state with the default test configuration.
    pub fn create_test_state() -> anyhow::Result<ServiceState> {
        let config = ServiceConfig::builder()
            .with_jwt_secret(TEST_SECRET)
            .build()?;
        Ok(ServiceState::in_memory(&config)?)
    }

    /// Returns a new [`TestServer`] with all routes and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let server = TestServer::new(routes(state))?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with all routes and in-memory state.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(create_test_state()?)
    }

    /// Logs `name` in and returns the session cookie.
    pub async fn login(server: &TestServer, name: &str) -> Cookie<'static> {
        server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": name }))
            .await
            .cookie(SESSION_COOKIE_NAME)
    }

    /// Session cache whose operations can be switched to fail.
    ///
    /// Clones share the switches, so a test can keep one handle while the
    /// state owns another.
    #[derive(Debug, Clone)]
    pub struct FaultyCache {
        inner: MemorySessionCache,
        faults: Arc<CacheFaults>,
    }

    #[derive(Debug, Default)]
    struct CacheFaults {
        set: AtomicBool,
        get: AtomicBool,
        delete: AtomicBool,
    }

    impl Default for FaultyCache {
        fn default() -> Self {
            Self {
                inner: MemorySessionCache::new(Duration::from_secs(60)),
                faults: Arc::default(),
            }
        }
    }

    impl FaultyCache {
        pub fn fail_set(&self) {
            self.faults.set.store(true, Ordering::SeqCst);
        }

        pub fn fail_get(&self) {
            self.faults.get.store(true, Ordering::SeqCst);
        }

        pub fn fail_delete(&self) {
            self.faults.delete.store(true, Ordering::SeqCst);
        }
    }

    fn cache_down(fault: &AtomicBool) -> Result<(), SessionCacheError> {
        if fault.load(Ordering::SeqCst) {
            return Err(SessionCacheError::unavailable("cache is down"));
        }
        Ok(())
    }

    #[async_trait::async_trait]
    impl SessionCacheProvider for FaultyCache {
        async fn set(&self, user_id: i64, token: &str) -> Result<(), SessionCacheError> {
            cache_down(&self.faults.set)?;
            self.inner.set(user_id, token).await
        }

        async fn get(&self, user_id: i64) -> Result<Option<String>, SessionCacheError> {
            cache_down(&self.faults.get)?;
            self.inner.get(user_id).await
        }

        async fn delete(&self, user_id: i64) -> Result<(), SessionCacheError> {
            cache_down(&self.faults.delete)?;
            self.inner.delete(user_id).await
        }
    }

    /// Session store that cannot persist records.
    #[derive(Debug, Default)]
    pub struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl SessionStoreProvider for ReadOnlyStore {
        async fn save(&self, _id: Uuid, _record: &SessionRecord) -> Result<(), CookieSessionError> {
            Err(CookieSessionError::Persist("store is read-only".into()))
        }

        async fn load(&self, _id: Uuid) -> Result<Option<SessionRecord>, CookieSessionError> {
            Ok(None)
        }

        async fn remove(&self, _id: Uuid) -> Result<(), CookieSessionError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        for path in ["/unknown", "/api/v1/unknown"] {
            let response = server.get(path).await;
            response.assert_status_not_found();
            assert_eq!(response.json::<serde_json::Value>()["name"], "not_found");
        }
        Ok(())
    }
}
