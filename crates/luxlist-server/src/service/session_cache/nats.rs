use luxlist_nats::NatsClient;
use luxlist_nats::kv::{KvStore, SessionCacheBucket, UserSessionKey};

use super::{SessionCacheError, SessionCacheProvider, SessionCacheResult};

/// Session cache backed by the `session_cache` JetStream KV bucket.
///
/// Entries expire through the bucket's `max_age`.
#[derive(Debug, Clone)]
pub struct NatsSessionCache {
    store: KvStore<UserSessionKey, String, SessionCacheBucket>,
}

impl NatsSessionCache {
    /// Opens the bucket, creating it if missing.
    pub async fn new(client: &NatsClient) -> luxlist_nats::Result<Self> {
        Ok(Self {
            store: client.session_cache_store().await?,
        })
    }
}

#[async_trait::async_trait]
impl SessionCacheProvider for NatsSessionCache {
    async fn set(&self, user_id: i64, token: &str) -> SessionCacheResult<()> {
        self.store
            .put(&UserSessionKey(user_id), &token.to_owned())
            .await
            .map_err(SessionCacheError::unavailable)
    }

    async fn get(&self, user_id: i64) -> SessionCacheResult<Option<String>> {
        self.store
            .get(&UserSessionKey(user_id))
            .await
            .map_err(SessionCacheError::unavailable)
    }

    async fn delete(&self, user_id: i64) -> SessionCacheResult<()> {
        self.store
            .delete(&UserSessionKey(user_id))
            .await
            .map_err(SessionCacheError::unavailable)
    }
}
