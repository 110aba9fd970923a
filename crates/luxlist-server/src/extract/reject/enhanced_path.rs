use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::enhanced_json::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Path parameter extractor with JSON error responses.
///
/// Task, tag and user ids are all 64-bit integers, so a non-numeric
/// segment is reported as a bad request rather than a missing route.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Returns the inner path parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let message = err.body_text();
                let hint = if message.contains("invalid digit") || message.contains("parse") {
                    "Identifiers must be whole numbers"
                } else {
                    "Check the parameter format"
                };

                ErrorKind::BadRequest
                    .with_message("Invalid path parameter")
                    .with_context(format!("{}. {hint}", sanitize_error_message(&message)))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(sanitize_error_message(&err.body_text())),
            rejection => {
                tracing::error!(error = %rejection, "unexpected path rejection");
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn echo(Path(id): Path<i64>) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/tasks/{id}", get(echo)))?;

        let response = server.get("/tasks/abc").await;
        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "bad_request");

        server.get("/tasks/42").await.assert_text("42");
        Ok(())
    }
}
