//! Key-value bucket configuration traits.

use std::time::Duration;

/// Lifetime of a login: both session buckets expire entries after an hour.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Marker trait for KV bucket configuration.
pub trait KvBucket: Clone + Send + Sync + 'static {
    /// Bucket name used in NATS KV.
    const NAME: &'static str;

    /// Human-readable description for the bucket.
    const DESCRIPTION: &'static str;

    /// Bucket-wide `max_age`. `None` keeps entries forever.
    const TTL: Option<Duration>;
}

/// Bucket mapping a user to the only access token currently accepted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionCacheBucket;

impl KvBucket for SessionCacheBucket {
    const NAME: &'static str = "session_cache";
    const DESCRIPTION: &'static str = "Current access token per user";
    const TTL: Option<Duration> = Some(SESSION_TTL);
}

/// Bucket for server-side cookie session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CookieSessionBucket;

impl KvBucket for CookieSessionBucket {
    const NAME: &'static str = "cookie_sessions";
    const DESCRIPTION: &'static str = "Cookie session records";
    const TTL: Option<Duration> = Some(SESSION_TTL);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_buckets_expire_after_an_hour() {
        assert_eq!(SessionCacheBucket::NAME, "session_cache");
        assert_eq!(SessionCacheBucket::TTL, Some(Duration::from_secs(3600)));
        assert_eq!(CookieSessionBucket::NAME, "cookie_sessions");
        assert_eq!(CookieSessionBucket::TTL, Some(Duration::from_secs(3600)));
    }
}
