//! NATS Key-Value store operations.
//!
//! This module provides type-safe abstractions over NATS KV:
//! - `KvStore<K, V, B>`: generic type-safe key-value operations
//! - `KvKey`: trait for key types and how they render as NATS keys
//! - `KvBucket`: trait for bucket configuration
//!
//! # Example
//!
//! ```ignore
//! let store = nats_client.session_cache_store().await?;
//!
//! store.put(&UserSessionKey(7), &token).await?;
//! let current = store.get(&UserSessionKey(7)).await?;
//! ```

mod kv_bucket;
mod kv_key;
mod kv_store;

pub use kv_bucket::{CookieSessionBucket, KvBucket, SESSION_TTL, SessionCacheBucket};
pub use kv_key::{CookieSessionKey, KvKey, UserSessionKey};
pub use kv_store::KvStore;
