//! Authentication gate for protected routes.
//!
//! A request passes only when its cookie session, the session cache and
//! the token agree. Every rejection clears the session cookie.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::extract::AuthSession;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// Extension trait for `axum::`[`Router`] to apply the authentication gate.
pub trait RouterAuthExt<S> {
    /// Requires an authenticated session on every route of this router.
    ///
    /// Applied as a route layer, so unmatched paths still fall through to
    /// the router's fallback.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Admits the request and attaches an [`AuthSession`] to its extensions.
///
/// On rejection the response is 401 and carries an expired session cookie.
pub async fn require_authentication(
    State(state): State<ServiceState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar).await {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(error) => {
            let jar = state.cookie_sessions.clear(jar).await;
            (jar, error).into_response()
        }
    }
}

async fn authenticate(state: &ServiceState, jar: &CookieJar) -> Result<AuthSession> {
    let Some(session) = state.cookie_sessions.read(jar).await else {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            "request without a cookie session"
        );
        return Err(ErrorKind::LoginRequired.into_error());
    };

    let cached = match state.session_cache.get(session.user_id).await {
        Ok(cached) => cached,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = session.user_id,
                error = %error,
                "session cache unavailable during authentication"
            );
            None
        }
    };

    if cached.as_deref() != Some(session.access_token.as_str()) {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = session.user_id,
            cached = cached.is_some(),
            "cookie session does not hold the active token"
        );
        return Err(ErrorKind::SessionExpired.into_error());
    }

    let claims = state.token_codec.verify(&session.access_token)?;

    tracing::trace!(
        target: TRACING_TARGET_AUTHENTICATION,
        user_id = claims.user_id,
        "request authenticated"
    );

    Ok(AuthSession::new(claims.user_id, session.access_token))
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Cookie;
    use serde_json::Value;

    use crate::handler::test::{
        FaultyCache, create_test_server, create_test_server_with_state, create_test_state, login,
    };
    use crate::service::{SESSION_COOKIE_NAME, SessionCache};

    #[tokio::test]
    async fn unreachable_cache_expires_session() -> anyhow::Result<()> {
        let cache = FaultyCache::default();
        let mut state = create_test_state()?;
        state.session_cache = SessionCache::new(cache.clone());
        let server = create_test_server_with_state(state)?;

        let cookie = login(&server, "alice").await;
        cache.fail_get();

        let response = server.get("/api/v1/auth").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "session_expired");
        assert_eq!(response.cookie(SESSION_COOKIE_NAME).value(), "");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_session_id_requires_login() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = Cookie::new(SESSION_COOKIE_NAME, uuid::Uuid::new_v4().to_string());

        let response = server.get("/api/v1/auth").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "login_required");
        assert_eq!(response.cookie(SESSION_COOKIE_NAME).value(), "");
        Ok(())
    }
}
