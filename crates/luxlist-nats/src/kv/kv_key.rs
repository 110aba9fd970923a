//! Key-value key types and traits.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::Error;

/// Marker trait for KV key types.
///
/// `Display` renders the NATS key and `FromStr` parses it back. NATS keys are
/// limited to `[-/_=.a-zA-Z0-9]`, so implementations use `.` as separator.
pub trait KvKey: fmt::Debug + fmt::Display + FromStr + Clone + Send + Sync + 'static {}

/// Key of a user's entry in the session cache, rendered `user_session.{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserSessionKey(pub i64);

impl UserSessionKey {
    const PREFIX: &'static str = "user_session.";
}

impl KvKey for UserSessionKey {}

impl fmt::Display for UserSessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for UserSessionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| Error::invalid_key(s, "missing user_session prefix"))?;
        let id = id
            .parse()
            .map_err(|e: std::num::ParseIntError| Error::invalid_key(s, e.to_string()))?;
        Ok(Self(id))
    }
}

impl From<i64> for UserSessionKey {
    fn from(user_id: i64) -> Self {
        Self(user_id)
    }
}

/// Key of a cookie session record: the opaque id carried by the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CookieSessionKey(pub Uuid);

impl CookieSessionKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl KvKey for CookieSessionKey {}

impl fmt::Display for CookieSessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CookieSessionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::parse_str(s).map_err(|e| Error::invalid_key(s, e.to_string()))?;
        Ok(Self(id))
    }
}

impl From<Uuid> for CookieSessionKey {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_session_key_format() {
        assert_eq!(UserSessionKey(1).to_string(), "user_session.1");
        assert_eq!("user_session.42".parse::<UserSessionKey>().unwrap().0, 42);
    }

    #[test]
    fn user_session_key_rejects_foreign_keys() {
        assert!("session.1".parse::<UserSessionKey>().is_err());
        assert!("user_session.abc".parse::<UserSessionKey>().is_err());
    }

    #[test]
    fn cookie_session_keys_are_unique() {
        assert_ne!(CookieSessionKey::generate(), CookieSessionKey::generate());
    }

    #[test]
    fn cookie_session_key_parses_uuid() {
        let key = CookieSessionKey(Uuid::nil());
        let parsed: CookieSessionKey = key.to_string().parse().unwrap();
        assert_eq!(key, parsed);
        assert!("not-a-uuid".parse::<CookieSessionKey>().is_err());
    }
}
