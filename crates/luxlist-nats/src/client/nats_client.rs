//! NATS client wrapper and connection management.
//!
//! The underlying `async-nats` client multiplexes every operation over a
//! single TCP connection and is `Arc`-wrapped internally, so [`NatsClient`]
//! clones share one connection.

use std::sync::Arc;
use std::time::Duration;

use async_nats::{Client, ConnectOptions, jetstream};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use super::nats_config::NatsConfig;
use crate::kv::{
    CookieSessionBucket, CookieSessionKey, KvBucket, KvKey, KvStore, SessionCacheBucket,
    UserSessionKey,
};
use crate::{Error, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_CONNECTION};

const MAX_RECONNECT_DELAY_MS: u64 = 30_000;

/// NATS client wrapper with connection management.
///
/// This wrapper is cheaply cloneable and thread-safe.
#[derive(Debug, Clone)]
pub struct NatsClient {
    inner: Arc<NatsClientInner>,
}

#[derive(Debug)]
struct NatsClientInner {
    client: Client,
    jetstream: jetstream::Context,
}

impl NatsClient {
    /// Creates a new NATS client and connects.
    #[tracing::instrument(skip(config), target = TRACING_TARGET_CONNECTION)]
    pub async fn connect(config: NatsConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            servers = %config.nats_url,
            "Connecting to NATS servers"
        );

        let mut connect_opts = ConnectOptions::new()
            .name(config.name())
            .ping_interval(config.ping_interval())
            .connection_timeout(config.connect_timeout());

        if let Some(token) = config.nats_token.clone() {
            connect_opts = connect_opts.token(token);
        }

        if let Some(max_reconnects) = config.max_reconnects_option() {
            connect_opts = connect_opts.max_reconnects(max_reconnects);
        }

        let reconnect_delay_ms = u64::try_from(config.reconnect_delay().as_millis())
            .unwrap_or(MAX_RECONNECT_DELAY_MS);
        connect_opts = connect_opts.reconnect_delay_callback(move |attempts| {
            let factor = 2_u64.saturating_pow(attempts.min(32) as u32);
            Duration::from_millis(
                reconnect_delay_ms
                    .saturating_mul(factor)
                    .min(MAX_RECONNECT_DELAY_MS),
            )
        });

        let connect_timeout = config.connect_timeout();
        let client = timeout(
            connect_timeout,
            async_nats::connect_with_options(config.servers().join(","), connect_opts),
        )
        .await
        .map_err(|_| Error::timeout(connect_timeout))?
        .map_err(|e| Error::Connection(Box::new(e)))?;

        let jetstream = jetstream::new(client.clone());

        let server_info = client.server_info();
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            server_host = %server_info.host,
            server_version = %server_info.version,
            server_id = %server_info.server_id,
            "Successfully connected to NATS"
        );

        Ok(Self {
            inner: Arc::new(NatsClientInner { client, jetstream }),
        })
    }
}

// Key-value store getters
impl NatsClient {
    /// Gets or creates a KV store for the specified key, value and bucket types.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_CLIENT)]
    pub async fn kv_store<K, V, B>(&self) -> Result<KvStore<K, V, B>>
    where
        K: KvKey,
        V: Serialize + DeserializeOwned + Send + Sync + 'static,
        B: KvBucket,
    {
        KvStore::new(&self.inner.jetstream).await
    }

    /// Gets or creates the store mapping a user to its current access token.
    pub async fn session_cache_store(
        &self,
    ) -> Result<KvStore<UserSessionKey, String, SessionCacheBucket>> {
        self.kv_store().await
    }

    /// Gets or creates the store holding cookie session records.
    pub async fn cookie_session_store<V>(
        &self,
    ) -> Result<KvStore<CookieSessionKey, V, CookieSessionBucket>>
    where
        V: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.kv_store().await
    }
}
