use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Query string extractor with JSON error responses.
///
/// Names the offending parameter when the deserializer reports one.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Consumes the wrapper and returns the inner query parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "query string rejected");

        let QueryRejection::FailedToDeserializeQueryString(err) = rejection else {
            return ErrorKind::BadRequest.with_message("Invalid query parameters");
        };

        let message = err.body_text();
        let field = field_name(&message).unwrap_or("unknown");

        if message.contains("missing field") {
            ErrorKind::BadRequest
                .with_message("Missing query parameter")
                .with_context(format!("'{field}' is required"))
        } else if message.contains("duplicate field") {
            ErrorKind::BadRequest
                .with_message("Duplicate query parameter")
                .with_context(format!("'{field}' was given more than once"))
        } else {
            ErrorKind::BadRequest
                .with_message("Invalid query parameters")
                .with_context(message)
        }
    }
}

/// Pulls a backtick-quoted field name out of a serde message.
fn field_name(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let end = message[start..].find('`')?;
    Some(&message[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_is_extracted() {
        assert_eq!(field_name("missing field `page`"), Some("page"));
        assert_eq!(field_name("duplicate field `limit`"), Some("limit"));
        assert_eq!(field_name("some other error"), None);
    }
}
