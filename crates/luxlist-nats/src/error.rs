//! Error types and utilities for NATS operations.

use std::time::Duration;

/// Result type for all NATS operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for NATS operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// NATS client/connection errors.
    #[error("NATS connection error: {0}")]
    Connection(#[from] async_nats::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation timeout.
    #[error("Operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// A key could not be parsed back from its NATS representation.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Generic operation error with context.
    #[error("NATS operation failed: {operation} - {details}")]
    Operation { operation: String, details: String },
}

impl Error {
    /// Create an operation error with context.
    pub fn operation(op: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Operation {
            operation: op.into(),
            details: details.into(),
        }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a timeout error with the given duration.
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { timeout: duration }
    }

    /// Returns whether the backend could not be reached, as opposed to
    /// returning bad data.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::Timeout { .. } | Error::Operation { .. }
        )
    }

    /// Get a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Error::Connection(_) => "Session backend is unavailable.".to_string(),
            Error::Timeout { timeout } => {
                format!("Session backend timed out after {timeout:?}.")
            }
            Error::Serialization(_) => "Stored session data is corrupt.".to_string(),
            Error::InvalidConfig { reason } => format!("Configuration error: {reason}"),
            _ => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_errors_count_as_unavailable() {
        assert!(Error::operation("kv_get", "no responders").is_unavailable());
        assert!(Error::timeout(Duration::from_secs(1)).is_unavailable());
        assert!(!Error::invalid_key("x", "bad").is_unavailable());
    }

    #[test]
    fn user_message_hides_details() {
        let error = Error::operation("kv_put", "stream offline at 10.0.0.3");
        assert!(!error.user_message().contains("10.0.0.3"));
    }
}
