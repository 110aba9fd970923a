//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── service: ServiceConfig       # Postgres, NATS, token secret, sessions
//! ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! └── server: ServerConfig         # Host, port, TLS, shutdown
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure database and server
//! luxlist --postgres-url "postgresql://..." --jwt-secret "..." --port 8080
//!
//! # Or via environment variables
//! POSTGRES_URL="postgresql://..." JWT_SECRET="..." PORT=8080 luxlist
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use luxlist_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the luxlist server:
/// - [`ServiceConfig`]: Postgres, NATS and session settings
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, recovery)
/// - [`ServerConfig`]: Network binding, TLS and shutdown
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "luxlist")]
#[command(about = "luxlist task backend server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Backend and session configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Emits logs as JSON lines instead of human-readable text.
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    #[serde(default)]
    pub log_json: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values
    /// act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, defaulting to `info`.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = self
            .log_json
            .then(|| tracing_subscriber::fmt::layer().json());
        let text_layer = (!self.log_json).then(tracing_subscriber::fmt::layer);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .init();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres = ?self.service.postgres,
            nats = ?self.service.nats,
            session_ttl_secs = self.service.session_ttl_secs,
            session_cookie_secure = self.service.session_cookie_secure,
            "Service configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_minimal_arguments() {
        let cli = Cli::try_parse_from([
            "luxlist",
            "--jwt-secret",
            "a-development-secret-of-32-bytes!",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.service.session_ttl_secs, 3600);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn wildcard_cors_origin_fails_validation() {
        let cli = Cli::try_parse_from([
            "luxlist",
            "--jwt-secret",
            "a-development-secret-of-32-bytes!",
            "--allowed-origins",
            "*",
        ])
        .unwrap();

        let error = cli.validate().unwrap_err();
        assert!(error.to_string().contains("middleware"));
    }
}
