//! Middleware for `axum::Router`.
//!
//! Each concern is applied through an extension trait:
//!
//! ```rust,ignore
//! let app = handler::routes(state)
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod authentication;
mod observability;
mod recovery;
mod security;

pub use crate::middleware::authentication::{RouterAuthExt, require_authentication};
pub use crate::middleware::observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use crate::middleware::recovery::{RecoveryConfig, RouterRecoveryExt};
pub use crate::middleware::security::{
    CorsConfig, FrameOptions, MAX_BODY_SIZE, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
