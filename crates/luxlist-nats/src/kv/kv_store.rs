//! Type-safe NATS KV store wrapper.

use std::fmt;
use std::marker::PhantomData;

use async_nats::jetstream::{self, kv};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KvBucket, KvKey};
use crate::{Error, Result, TRACING_TARGET_KV};

/// Type-safe NATS KV store wrapper.
///
/// This store is generic over:
/// - `K`: the key type (determines the rendered key)
/// - `V`: the value type to store, encoded as JSON
/// - `B`: the bucket configuration (name, description, TTL)
#[derive(Clone)]
pub struct KvStore<K, V, B>
where
    K: KvKey,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: KvBucket,
{
    store: kv::Store,
    _key: PhantomData<K>,
    _value: PhantomData<V>,
    _bucket: PhantomData<B>,
}

impl<K, V, B> KvStore<K, V, B>
where
    K: KvKey,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: KvBucket,
{
    /// Opens the bucket, creating it with the configured TTL if missing.
    #[tracing::instrument(skip(jetstream), target = TRACING_TARGET_KV)]
    pub(crate) async fn new(jetstream: &jetstream::Context) -> Result<Self> {
        let ttl = B::TTL.unwrap_or_default();

        let store = match jetstream.get_key_value(B::NAME).await {
            Ok(store) => {
                tracing::debug!(
                    target: TRACING_TARGET_KV,
                    bucket = %B::NAME,
                    "Using existing KV bucket"
                );
                store
            }
            Err(_) => {
                tracing::debug!(
                    target: TRACING_TARGET_KV,
                    bucket = %B::NAME,
                    ttl_secs = ttl.as_secs(),
                    "Creating new KV bucket"
                );
                let config = kv::Config {
                    bucket: B::NAME.to_string(),
                    description: B::DESCRIPTION.to_string(),
                    max_age: ttl,
                    ..Default::default()
                };
                jetstream
                    .create_key_value(config)
                    .await
                    .map_err(|e| Error::operation("kv_create", e.to_string()))?
            }
        };

        Ok(Self {
            store,
            _key: PhantomData,
            _value: PhantomData,
            _bucket: PhantomData,
        })
    }

    /// Writes a value, replacing any previous one and restarting its TTL.
    #[tracing::instrument(skip(self, value), target = TRACING_TARGET_KV)]
    pub async fn put(&self, key: &K, value: &V) -> Result<()> {
        let key_str = key.to_string();
        let json = serde_json::to_vec(value)?;
        let size = json.len();
        let revision = self
            .store
            .put(&key_str, json.into())
            .await
            .map_err(|e| Error::operation("kv_put", e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET_KV,
            key = %key_str,
            revision,
            size_bytes = size,
            "Put value to KV store"
        );

        Ok(())
    }

    /// Reads a value.
    ///
    /// Returns `Ok(None)` for missing, expired or deleted keys and `Err` when
    /// the bucket cannot be reached or the stored bytes do not decode.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_KV)]
    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let key_str = key.to_string();
        let bytes = self
            .store
            .get(&key_str)
            .await
            .map_err(|e| Error::operation("kv_get", e.to_string()))?;

        let Some(bytes) = bytes else {
            tracing::debug!(
                target: TRACING_TARGET_KV,
                key = %key_str,
                "Key not found in KV store"
            );
            return Ok(None);
        };

        let value = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            target: TRACING_TARGET_KV,
            key = %key_str,
            size_bytes = bytes.len(),
            "Retrieved value from KV store"
        );
        Ok(Some(value))
    }

    /// Removes a key and its history. Removing a missing key succeeds.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_KV)]
    pub async fn delete(&self, key: &K) -> Result<()> {
        let key_str = key.to_string();
        self.store
            .purge(&key_str)
            .await
            .map_err(|e| Error::operation("kv_delete", e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET_KV,
            key = %key_str,
            "Deleted key from KV store"
        );
        Ok(())
    }
}

impl<K, V, B> fmt::Debug for KvStore<K, V, B>
where
    K: KvKey,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: KvBucket,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvStore")
            .field("bucket", &B::NAME)
            .finish_non_exhaustive()
    }
}
