use luxlist_nats::kv::{CookieSessionBucket, CookieSessionKey, KvStore};
use luxlist_nats::{Error as NatsError, NatsClient};
use uuid::Uuid;

use super::{CookieSessionError, CookieSessionResult, SessionRecord, SessionStoreProvider};
use crate::utility::tracing_targets::TRACING_TARGET_SESSION;

/// Session records stored in the `cookie_sessions` JetStream KV bucket.
#[derive(Debug, Clone)]
pub struct NatsSessionStore {
    store: KvStore<CookieSessionKey, SessionRecord, CookieSessionBucket>,
}

impl NatsSessionStore {
    /// Opens the bucket, creating it if missing.
    pub async fn new(client: &NatsClient) -> luxlist_nats::Result<Self> {
        Ok(Self {
            store: client.cookie_session_store().await?,
        })
    }
}

#[async_trait::async_trait]
impl SessionStoreProvider for NatsSessionStore {
    async fn save(&self, id: Uuid, record: &SessionRecord) -> CookieSessionResult<()> {
        self.store
            .put(&CookieSessionKey(id), record)
            .await
            .map_err(|e| CookieSessionError::Persist(e.into()))
    }

    async fn load(&self, id: Uuid) -> CookieSessionResult<Option<SessionRecord>> {
        match self.store.get(&CookieSessionKey(id)).await {
            Ok(record) => Ok(record),
            Err(NatsError::Serialization(error)) => {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    error = %error,
                    "discarding undecodable cookie session"
                );
                Ok(None)
            }
            Err(error) => Err(CookieSessionError::Unavailable(error.into())),
        }
    }

    async fn remove(&self, id: Uuid) -> CookieSessionResult<()> {
        self.store
            .delete(&CookieSessionKey(id))
            .await
            .map_err(|e| CookieSessionError::Unavailable(e.into()))
    }
}
