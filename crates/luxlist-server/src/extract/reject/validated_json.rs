//! JSON extractor that runs `validator` rules after deserialization.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// [`Json`] followed by [`Validate::validate`].
///
/// Every failing rule is listed in the error message, so a client sees
/// all problems with a request body at once.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

fn param_u64(params: &Params, key: &str) -> Option<u64> {
    params.get(key).and_then(serde_json::Value::as_u64)
}

fn format_length_error(field: &str, params: &Params) -> String {
    match (
        param_u64(params, "equal"),
        param_u64(params, "min"),
        param_u64(params, "max"),
    ) {
        (Some(equal), _, _) => format!("Field '{field}' must be exactly {equal} characters long"),
        (None, Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (None, Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        _ => format!("Field '{field}' has invalid length"),
    }
}

fn format_range_error(field: &str, params: &Params) -> String {
    let min = params.get("min");
    let max = params.get("max");

    match (min, max) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}"),
        _ => format!("Field '{field}' is out of range"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}' {message}");
    }

    match error.code.as_ref() {
        "required" => format!("Field '{field}' is required"),
        "length" => format_length_error(field, &error.params),
        "range" => format_range_error(field, &error.params),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        tracing::debug!(errors = ?errors.field_errors(), "request validation failed");

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            _ => messages.join(". "),
        };

        ErrorKind::BadRequest.with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        name: String,
        #[validate(length(equal = 7))]
        color: String,
        #[validate(range(min = 1, max = 3))]
        priority: i32,
    }

    #[test]
    fn lists_every_failing_field() {
        let sample = Sample {
            name: String::new(),
            color: "#fff".to_owned(),
            priority: 9,
        };

        let error: Error<'static> = sample.validate().unwrap_err().into();
        let message = error.message().unwrap_or_default();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert!(message.contains("'name' must be between 1 and 5 characters long"));
        assert!(message.contains("'color' must be exactly 7 characters long"));
        assert!(message.contains("'priority' must be between 1 and 3"));
    }

    #[test]
    fn custom_message_is_used() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "color",
            ValidationError::new("color").with_message(Cow::Borrowed("must start with '#'")),
        );

        let error: Error<'static> = errors.into();
        assert_eq!(error.message(), Some("Field 'color' must start with '#'"));
    }
}
