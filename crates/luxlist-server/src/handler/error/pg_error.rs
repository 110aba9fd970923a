//! Postgres error to HTTP error conversion.
//!
//! Known constraint violations become client errors (see `pg_constraints`);
//! everything else is logged and reported as an opaque 500.

use luxlist_postgres::PgError;
use luxlist_postgres::types::ConstraintViolation;

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversions.
const TRACING_TARGET: &str = "luxlist_server::postgres_constraints";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::Task(c) => c.into(),
            ConstraintViolation::Tag(c) => c.into(),
            ConstraintViolation::TaskTag(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint) = error.constraint_violation() {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = %constraint,
                        category = ?constraint.categorize(),
                        "query rejected by constraint"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use luxlist_postgres::types::{TagConstraints, TaskTagConstraints};

    use super::*;

    #[test]
    fn duplicate_link_is_conflict() {
        let error: Error = ConstraintViolation::TaskTag(TaskTagConstraints::AlreadyLinked).into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn invalid_color_is_bad_request() {
        let error: Error = ConstraintViolation::Tag(TagConstraints::ColorFormat).into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn other_errors_are_opaque() {
        let error: Error = PgError::Config("secret details".into()).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.message().is_none());
    }
}
