//! Middleware configuration for the HTTP server.
//!
//! Groups the CLI-configurable middleware settings re-exported from
//! `luxlist-server`: CORS and request recovery.
//!
//! # Example
//!
//! ```bash
//! luxlist --allowed-origins "https://app.example.com" --request-timeout 60
//! ```

use clap::Args;
use luxlist_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS configuration.
    ///
    /// Credentials stay enabled by default so the session cookie reaches
    /// the API from browser clients.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates the CORS origin list.
    pub fn validate(&self) -> luxlist_server::Result<()> {
        self.cors.validate()
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}
