use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::{SessionCacheProvider, SessionCacheResult};

/// In-process session cache with per-entry expiry.
///
/// Used by tests and single-process development setups.
#[derive(Debug, Clone)]
pub struct MemorySessionCache {
    entries: Arc<RwLock<HashMap<i64, CacheEntry>>>,
    ttl: Duration,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    token: String,
    expires_at: Instant,
}

impl MemorySessionCache {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::default(),
            ttl,
        }
    }
}

#[async_trait::async_trait]
impl SessionCacheProvider for MemorySessionCache {
    async fn set(&self, user_id: i64, token: &str) -> SessionCacheResult<()> {
        let entry = CacheEntry {
            token: token.to_owned(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(user_id, entry);
        Ok(())
    }

    async fn get(&self, user_id: i64) -> SessionCacheResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match entries.get(&user_id) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.token.clone())),
            Some(_) => {
                entries.remove(&user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: i64) -> SessionCacheResult<()> {
        self.entries.write().await.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SessionCache;

    #[tokio::test]
    async fn set_overwrites_previous_token() {
        let cache = SessionCache::new(MemorySessionCache::new(Duration::from_secs(60)));

        cache.set(1, "first").await.unwrap();
        cache.set(1, "second").await.unwrap();

        assert_eq!(cache.get(1).await.unwrap().as_deref(), Some("second"));
        assert_eq!(cache.get(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let cache = SessionCache::new(MemorySessionCache::new(Duration::from_secs(60)));

        cache.set(1, "token").await.unwrap();
        cache.delete(1).await.unwrap();
        cache.delete(1).await.unwrap();

        assert_eq!(cache.get(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_are_absent() {
        let cache = SessionCache::new(MemorySessionCache::new(Duration::from_millis(10)));

        cache.set(1, "token").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get(1).await.unwrap(), None);
    }
}
