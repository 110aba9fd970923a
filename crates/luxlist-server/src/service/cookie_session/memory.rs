use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CookieSessionResult, SessionRecord, SessionStoreProvider};

/// In-process session records with per-record expiry.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    records: Arc<RwLock<HashMap<Uuid, StoredRecord>>>,
    ttl: Duration,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    record: SessionRecord,
    expires_at: Instant,
}

impl MemorySessionStore {
    /// Creates an empty store whose records live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: Arc::default(),
            ttl,
        }
    }
}

#[async_trait::async_trait]
impl SessionStoreProvider for MemorySessionStore {
    async fn save(&self, id: Uuid, record: &SessionRecord) -> CookieSessionResult<()> {
        let stored = StoredRecord {
            record: record.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.records.write().await.insert(id, stored);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> CookieSessionResult<Option<SessionRecord>> {
        let now = Instant::now();
        let mut records = self.records.write().await;

        match records.get(&id) {
            Some(stored) if stored.expires_at > now => Ok(Some(stored.record.clone())),
            Some(_) => {
                records.remove(&id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: Uuid) -> CookieSessionResult<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expired_records_are_evicted_on_load() {
        let store = MemorySessionStore::new(Duration::from_millis(10));
        let id = Uuid::new_v4();

        store.save(id, &SessionRecord::new(1, "token")).await.unwrap();
        assert_eq!(store.records.read().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(store.load(id).await.unwrap().is_none());
        assert!(store.records.read().await.is_empty());
    }
}
