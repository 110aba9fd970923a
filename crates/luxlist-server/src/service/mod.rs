//! Application state and dependency injection.

mod config;
mod cookie_session;
mod session_cache;
mod user_directory;

use luxlist_postgres::PgClient;

pub use crate::authentication::TokenCodec;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::cookie_session::{
    CookieSessionConfig, CookieSessionError, CookieSessions, MemorySessionStore,
    NatsSessionStore, SESSION_COOKIE_NAME, SESSION_COOKIE_PATH, SessionData, SessionRecord,
    SessionStoreProvider,
};
pub use crate::service::session_cache::{
    MemorySessionCache, NatsSessionCache, SessionCache, SessionCacheError,
    SessionCacheProvider,
};
pub use crate::service::user_directory::{
    MemoryUserDirectory, PgUserDirectory, UserDirectory, UserDirectoryError, UserProvider,
};
use crate::utility::tracing_targets::TRACING_TARGET_SERVICE;
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Session services:
    pub users: UserDirectory,
    pub session_cache: SessionCache,
    pub cookie_sessions: CookieSessions,
    pub token_codec: TokenCodec,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres (applying migrations) and NATS, and opens the
    /// session buckets.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let postgres = config.connect_postgres().await?;
        let nats = config.connect_nats().await?;

        let session_cache = NatsSessionCache::new(&nats).await?;
        let session_store = NatsSessionStore::new(&nats).await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            session_ttl_secs = config.session_ttl_secs,
            cookie_secure = config.session_cookie_secure,
            "service state initialized"
        );

        Ok(Self {
            users: UserDirectory::new(PgUserDirectory::new(postgres.clone())),
            postgres,
            session_cache: SessionCache::new(session_cache),
            cookie_sessions: CookieSessions::new(session_store, config.cookie_config()),
            token_codec: config.token_codec()?,
        })
    }

    /// Builds state with in-process users and session backends.
    ///
    /// The Postgres pool is created lazily and never connected unless a
    /// task or tag route is called.
    pub fn in_memory(config: &ServiceConfig) -> Result<Self> {
        let ttl = config.session_ttl();
        let postgres = PgClient::new(config.postgres.clone())?;

        Ok(Self {
            postgres,
            users: UserDirectory::new(MemoryUserDirectory::new()),
            session_cache: SessionCache::new(MemorySessionCache::new(ttl)),
            cookie_sessions: CookieSessions::new(
                MemorySessionStore::new(ttl),
                config.cookie_config(),
            ),
            token_codec: config.token_codec()?,
        })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Session services:
impl_di!(users: UserDirectory);
impl_di!(session_cache: SessionCache);
impl_di!(cookie_sessions: CookieSessions);
impl_di!(token_codec: TokenCodec);
