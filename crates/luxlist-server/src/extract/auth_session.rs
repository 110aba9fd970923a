use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::handler::{ErrorKind, Result};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// Identity of the caller on a protected route.
///
/// Inserted into the request extensions by the authentication gate after
/// the cookie session, the session cache and the token all agree. On routes
/// without the gate, extraction fails with [`ErrorKind::Unauthorized`].
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    user_id: i64,
    token: String,
}

impl AuthSession {
    /// Creates the authenticated identity from a verified token.
    #[inline]
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }

    /// Returns the authenticated user id.
    #[inline]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the session token the request was authenticated with.
    #[inline]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Allows access only to the caller's own resources.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Forbidden`] if `user_id` is another user.
    pub fn authorize_self(&self, user_id: i64) -> Result<()> {
        if self.user_id == user_id {
            return Ok(());
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = self.user_id,
            target_user_id = user_id,
            "access to another user's resources denied"
        );

        Err(ErrorKind::Forbidden
            .with_message("Resources of other users are not accessible")
            .with_resource("user"))
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Sync + Send,
{
    type Rejection = crate::handler::Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                path = %parts.uri.path(),
                "authenticated session requested on an unprotected route"
            );
            ErrorKind::Unauthorized.into_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn whoami(session: AuthSession) -> String {
        session.user_id().to_string()
    }

    #[test]
    fn authorize_self_rejects_other_users() {
        let session = AuthSession::new(1, "token");
        assert!(session.authorize_self(1).is_ok());

        let error = session.authorize_self(2).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn debug_hides_token() {
        let session = AuthSession::new(1, "secret-token");
        assert!(!format!("{session:?}").contains("secret-token"));
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/me", get(whoami)))?;

        let response = server.get("/me").await;
        response.assert_status_unauthorized();
        Ok(())
    }
}
