//! Login, logout and the current user.
//!
//! Login is name-only: an unseen name registers a new user. Every login
//! issues a fresh token, stores it as the user's single active session in
//! the session cache and starts a cookie session referencing it.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;

use crate::extract::{AuthSession, Json, ValidateJson};
use crate::handler::request::Login;
use crate::handler::response::{LoggedIn, Message, Profile, User};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{
    CookieSessions, ServiceState, SessionCache, SessionCacheError, TokenCodec, UserDirectory,
};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "luxlist_server::handler::authentication";

/// Logs a user in, registering the name on first use.
///
/// Responds 201 for a new user and 200 otherwise. No cookie is set unless
/// both the cache entry and the cookie session were written.
#[tracing::instrument(skip_all)]
async fn login(
    State(users): State<UserDirectory>,
    State(token_codec): State<TokenCodec>,
    State(session_cache): State<SessionCache>,
    State(cookie_sessions): State<CookieSessions>,
    jar: CookieJar,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, CookieJar, Json<LoggedIn>)> {
    let (user, created) = users.find_or_register(request.trimmed_name()).await?;

    let token = token_codec.issue(user.id)?;
    session_cache.set(user.id, &token).await?;
    let jar = cookie_sessions.start(jar, user.id, &token).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        created = created,
        "user logged in"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let response = LoggedIn {
        message: "User Logged In".to_owned(),
        user: User::from_model(user),
    };

    Ok((status, jar, Json(response)))
}

/// Ends the caller's session.
///
/// The cookie session is cleared before the cache entry is deleted, so the
/// cookie is gone even when the cache fails with 500. An entry that already
/// holds a newer login's token is left in place.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id()))]
async fn logout(
    State(session_cache): State<SessionCache>,
    State(cookie_sessions): State<CookieSessions>,
    auth_session: AuthSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Message>), (CookieJar, Error<'static>)> {
    let jar = cookie_sessions.clear(jar).await;

    if let Err(error) = end_cached_session(&session_cache, &auth_session).await {
        return Err((jar, error.into()));
    }

    tracing::info!(target: TRACING_TARGET, "user logged out");

    Ok((jar, Json(Message::new("User Logged Out"))))
}

async fn end_cached_session(
    session_cache: &SessionCache,
    auth_session: &AuthSession,
) -> Result<(), SessionCacheError> {
    let user_id = auth_session.user_id();

    match session_cache.get(user_id).await? {
        Some(current) if current != auth_session.token() => {
            tracing::debug!(
                target: TRACING_TARGET,
                user_id = user_id,
                "cache holds a newer session, keeping it"
            );
            Ok(())
        }
        _ => session_cache.delete(user_id).await,
    }
}

/// Returns the authenticated user.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id()))]
async fn profile(
    State(users): State<UserDirectory>,
    auth_session: AuthSession,
) -> Result<(StatusCode, Json<Profile>)> {
    let user = users
        .find_by_id(auth_session.user_id())
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("User not found")
                .with_resource("user")
        })?;

    let response = Profile {
        user: User::from_model(user),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with the routes that need no session.
pub fn public_routes() -> Router<ServiceState> {
    Router::new().route("/auth/login", post(login))
}

/// Returns a [`Router`] with the routes behind the authentication gate.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth", get(profile))
        .route("/auth/logout", get(logout))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_extra::extract::CookieJar;
    use serde_json::{Value, json};

    use super::end_cached_session;
    use crate::authentication::TokenCodec;
    use crate::extract::AuthSession;
    use crate::handler::test::{
        FaultyCache, ReadOnlyStore, create_test_server, create_test_server_with_state,
        create_test_state,
    };
    use crate::service::{
        CookieSessionConfig, CookieSessions, MemorySessionCache, SESSION_COOKIE_NAME,
        SessionCache,
    };

    #[tokio::test]
    async fn first_login_registers_user() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "alice" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["message"], "User Logged In");
        assert_eq!(body["user"]["id"], 1);
        assert_eq!(body["user"]["name"], "alice");

        let cookie = response.cookie(SESSION_COOKIE_NAME);
        assert_eq!(cookie.path(), Some("/api/v1"));
        assert_eq!(cookie.http_only(), Some(true));

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "  alice " }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["user"]["id"], 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "   " }))
            .await;
        response.assert_status_bad_request();
        assert!(response.maybe_cookie(SESSION_COOKIE_NAME).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn profile_requires_login() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/v1/auth").await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "login_required");
        Ok(())
    }

    #[tokio::test]
    async fn second_login_supersedes_first() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let first = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "alice" }))
            .await
            .cookie(SESSION_COOKIE_NAME);
        let second = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "alice" }))
            .await
            .cookie(SESSION_COOKIE_NAME);

        let response = server.get("/api/v1/auth").add_cookie(first).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "session_expired");
        assert_eq!(response.cookie(SESSION_COOKIE_NAME).value(), "");

        let response = server.get("/api/v1/auth").add_cookie(second).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["user"]["name"], "alice");
        Ok(())
    }

    #[tokio::test]
    async fn foreign_token_is_unauthorized() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let foreign = TokenCodec::new(
            "a-different-secret-for-signing-tokens",
            std::time::Duration::from_secs(60),
        )?;
        let token = foreign.issue(1)?;

        // Cache and cookie agree, only the signature is wrong.
        state.session_cache.set(1, &token).await?;
        let jar = state
            .cookie_sessions
            .start(CookieJar::new(), 1, &token)
            .await?;
        let cookie = jar
            .get(SESSION_COOKIE_NAME)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("session cookie was not set"))?;

        let server = create_test_server_with_state(state)?;
        let response = server.get("/api/v1/auth").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "session_expired");
        Ok(())
    }

    #[tokio::test]
    async fn logout_ends_session() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let cookie = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "alice" }))
            .await
            .cookie(SESSION_COOKIE_NAME);

        let response = server
            .get("/api/v1/auth/logout")
            .add_cookie(cookie.clone())
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], "User Logged Out");
        assert_eq!(response.cookie(SESSION_COOKIE_NAME).value(), "");

        let response = server.get("/api/v1/auth").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "login_required");
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_cookie_when_cache_fails() -> anyhow::Result<()> {
        let cache = FaultyCache::default();
        let mut state = create_test_state()?;
        state.session_cache = SessionCache::new(cache.clone());
        let server = create_test_server_with_state(state)?;

        let cookie = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "alice" }))
            .await
            .cookie(SESSION_COOKIE_NAME);
        cache.fail_delete();

        let response = server
            .get("/api/v1/auth/logout")
            .add_cookie(cookie.clone())
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.cookie(SESSION_COOKIE_NAME).value(), "");

        // The cache still holds the token, but the cookie session is gone.
        let response = server.get("/api/v1/auth").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "login_required");
        Ok(())
    }

    #[tokio::test]
    async fn login_fails_when_cache_write_fails() -> anyhow::Result<()> {
        let cache = FaultyCache::default();
        cache.fail_set();
        let mut state = create_test_state()?;
        state.session_cache = SessionCache::new(cache);
        let server = create_test_server_with_state(state)?;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "bob" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.maybe_cookie(SESSION_COOKIE_NAME).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn login_fails_when_session_is_not_saved() -> anyhow::Result<()> {
        let config = CookieSessionConfig {
            secure: false,
            max_age: Duration::from_secs(60),
        };
        let mut state = create_test_state()?;
        state.cookie_sessions = CookieSessions::new(ReadOnlyStore, config);
        let server = create_test_server_with_state(state)?;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "name": "bob" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.maybe_cookie(SESSION_COOKIE_NAME).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn logout_keeps_newer_session() -> anyhow::Result<()> {
        let cache = SessionCache::new(MemorySessionCache::new(Duration::from_secs(60)));
        cache.set(1, "newer").await?;

        end_cached_session(&cache, &AuthSession::new(1, "older")).await?;
        assert_eq!(cache.get(1).await?.as_deref(), Some("newer"));

        end_cached_session(&cache, &AuthSession::new(1, "newer")).await?;
        assert_eq!(cache.get(1).await?, None);
        Ok(())
    }
}
