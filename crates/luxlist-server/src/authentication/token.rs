use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utility::tracing_targets::TRACING_TARGET_TOKEN;
use crate::{Error, Result};

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the authenticated user.
    pub user_id: i64,
    /// Issued at, unix seconds.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expires at, unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Random token id; two logins within one second still differ.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
}

impl Claims {
    /// Returns whether the claims are expired at `now`.
    ///
    /// A token whose expiry equals the current second is already expired.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now.as_second()
    }
}

/// Reasons a token can be refused or fail to be produced.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature or signing algorithm does not match.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
    /// The input is not a decodable token.
    #[error("token is malformed")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    /// Signing failed.
    #[error("token could not be issued")]
    Issue(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 session tokens.
///
/// Cloning is cheap: the keys are shared behind an [`Arc`].
#[derive(Clone)]
pub struct TokenCodec {
    inner: Arc<TokenCodecInner>,
}

struct TokenCodecInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec from a shared secret and the token lifetime.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes or the lifetime is zero.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "JWT secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        if ttl.is_zero() {
            return Err(Error::config("session lifetime must be positive"));
        }

        // Expiry is checked against an explicit clock in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            inner: Arc::new(TokenCodecInner {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                validation,
                ttl,
            }),
        })
    }

    /// Returns the lifetime of issued tokens.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Issues a token for `user_id`, valid from now for [`ttl`](Self::ttl).
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, Timestamp::now())
    }

    /// Issues a token for `user_id` as if the current time were `now`.
    pub fn issue_at(&self, user_id: i64, now: Timestamp) -> Result<String, TokenError> {
        let issued_at = now.as_second();
        let ttl_secs = i64::try_from(self.inner.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            user_id,
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
            token_id: Uuid::new_v4(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.inner.encoding_key,
        )
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_TOKEN,
                user_id = %user_id,
                error = %err,
                "failed to sign session token"
            );
            TokenError::Issue(err)
        })
    }

    /// Verifies `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Timestamp::now())
    }

    /// Verifies `token` as if the current time were `now`.
    ///
    /// Only HS256 tokens signed with this codec's secret are accepted.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.inner.decoding_key, &self.inner.validation)
            .map_err(|err| match err.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(err),
            })?;

        if data.claims.is_expired_at(now) {
            tracing::debug!(
                target: TRACING_TARGET_TOKEN,
                user_id = %data.claims.user_id,
                expires_at = data.claims.expires_at,
                "session token has expired"
            );
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.inner.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    const SECRET: &str = "an-hs256-secret-that-is-long-enough!";
    const HOUR: Duration = Duration::from_secs(3600);

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, HOUR).unwrap()
    }

    #[test]
    fn issued_token_verifies_immediately() {
        let codec = codec();
        let now = Timestamp::now();

        let token = codec.issue_at(7, now).unwrap();
        let claims = codec.verify_at(&token, now).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[test]
    fn tokens_issued_together_differ() {
        let codec = codec();
        let now = Timestamp::now();

        let first = codec.issue_at(1, now).unwrap();
        let second = codec.issue_at(1, now).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn token_expires_at_exact_expiry() {
        let codec = codec();
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let token = codec.issue_at(1, now).unwrap();

        let just_before = now + SignedDuration::from_secs(3599);
        assert!(codec.verify_at(&token, just_before).is_ok());

        let at_expiry = now + SignedDuration::from_secs(3600);
        assert!(matches!(
            codec.verify_at(&token, at_expiry),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn oversized_ttl_saturates_expiry() {
        let codec = TokenCodec::new(SECRET, Duration::MAX).unwrap();
        let now = Timestamp::now();

        let token = codec.issue_at(1, now).unwrap();
        let claims = codec.verify_at(&token, now).unwrap();
        assert_eq!(claims.expires_at, i64::MAX);
    }

    #[test]
    fn different_secret_is_invalid_signature() {
        let other = TokenCodec::new("another-hs256-secret-that-is-long-enough", HOUR).unwrap();
        let token = other.issue(1).unwrap();

        assert!(matches!(
            codec().verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let claims = Claims {
            user_id: 1,
            issued_at: Timestamp::now().as_second(),
            expires_at: Timestamp::now().as_second() + 60,
            token_id: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec().verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            codec().verify("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        let error = TokenCodec::new("short", HOUR).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::Config);
        assert!(TokenCodec::new(SECRET, Duration::ZERO).is_err());
    }

    #[test]
    fn debug_does_not_print_keys() {
        let debug = format!("{:?}", codec());
        assert!(!debug.contains(SECRET));
    }
}
