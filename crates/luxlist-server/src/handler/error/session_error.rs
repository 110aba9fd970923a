//! Session and token error to HTTP error conversion.
//!
//! Backend failures on the login and logout paths are 500s; a token that
//! fails verification is an expired session.

use crate::authentication::TokenError;
use crate::handler::{Error, ErrorKind};
use crate::service::{CookieSessionError, SessionCacheError, UserDirectoryError};

/// Tracing target for session error conversions.
const TRACING_TARGET: &str = "luxlist_server::session_errors";

impl From<SessionCacheError> for Error<'static> {
    fn from(error: SessionCacheError) -> Self {
        tracing::error!(target: TRACING_TARGET, error = %error, "session cache failure");
        ErrorKind::InternalServerError
            .with_context("Session cache is unavailable")
            .with_resource("session")
    }
}

impl From<CookieSessionError> for Error<'static> {
    fn from(error: CookieSessionError) -> Self {
        tracing::error!(target: TRACING_TARGET, error = %error, "cookie session failure");
        ErrorKind::InternalServerError
            .with_context("Session could not be saved")
            .with_resource("session")
    }
}

impl From<UserDirectoryError> for Error<'static> {
    fn from(error: UserDirectoryError) -> Self {
        match error {
            UserDirectoryError::Storage(pg_error) => pg_error.into(),
            UserDirectoryError::NameTaken => {
                tracing::error!(
                    target: TRACING_TARGET,
                    "user vanished after a registration conflict"
                );
                ErrorKind::InternalServerError.with_resource("user")
            }
        }
    }
}

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Issue(_) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "token issuance failure");
                ErrorKind::InternalServerError.with_resource("session")
            }
            TokenError::InvalidSignature | TokenError::Expired | TokenError::Malformed(_) => {
                ErrorKind::SessionExpired.into_error()
            }
        }
    }
}
