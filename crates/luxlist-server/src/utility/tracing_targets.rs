//! Tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters, e.g. `RUST_LOG=luxlist_server::session=debug`.

/// Login, logout and the request authentication gate.
pub const TRACING_TARGET_AUTHENTICATION: &str = "luxlist_server::authentication";

/// Token issuance and verification.
pub const TRACING_TARGET_TOKEN: &str = "luxlist_server::token";

/// Session cache and cookie session backends.
pub const TRACING_TARGET_SESSION: &str = "luxlist_server::session";

/// Service state construction and backend connections.
pub const TRACING_TARGET_SERVICE: &str = "luxlist_server::service";


/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "luxlist_server::recovery::error";

/// Panic recovery including handler panics and service failures.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "luxlist_server::recovery::panic";
