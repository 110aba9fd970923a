//! CORS, security headers, compression and request body limits.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{Error, Result};

/// Maximum accepted request body (64 KiB); task and tag payloads are small.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Origins allowed when none are configured.
const DEVELOPMENT_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Wildcard origin; cannot be listed alongside credentialed cookies.
const ANY_ORIGIN: &str = "*";

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, security headers, compression and body limits.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    /// Layers security middleware with development CORS origins.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        // Cookies only cross origins when credentials are allowed, which in
        // turn requires an explicit origin list.
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.to_header_values())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(cors.allow_credentials)
            .max_age(cors.max_age());

        let mut router = self
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(headers.frame_options.as_str()),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static(headers.referrer_policy.as_str()),
            ));

        if let Some(hsts) = headers.hsts_header_value() {
            router = router.layer(SetResponseHeaderLayer::overriding(
                header::STRICT_TRANSPORT_SECURITY,
                hsts,
            ));
        }

        router
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Allowed origins. Falls back to local development origins if empty.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight responses in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether browsers may send the session cookie cross-origin.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "true")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the preflight max age.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Rejects origin lists the CORS layer cannot serve.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any origin is the `*` wildcard.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_origins.iter().any(|o| o.trim() == ANY_ORIGIN) {
            return Err(Error::config(
                "CORS origin `*` is not supported, list the allowed origins explicitly",
            ));
        }

        Ok(())
    }

    /// Parses the configured origins, skipping invalid and wildcard entries.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return DEVELOPMENT_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(_) if origin == ANY_ORIGIN => {
                    tracing::warn!("ignoring wildcard CORS origin");
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect()
    }
}

/// Response security headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// HSTS max age in seconds; `0` disables the header.
    pub hsts_max_age_seconds: u64,
    /// X-Frame-Options value.
    pub frame_options: FrameOptions,
    /// Referrer-Policy value.
    pub referrer_policy: ReferrerPolicy,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_max_age_seconds: 31_536_000,
            frame_options: FrameOptions::Deny,
            referrer_policy: ReferrerPolicy::StrictOriginWhenCrossOrigin,
        }
    }
}

impl SecurityHeadersConfig {
    /// Returns the `Strict-Transport-Security` value, if enabled.
    pub fn hsts_header_value(&self) -> Option<HeaderValue> {
        if self.hsts_max_age_seconds == 0 {
            return None;
        }

        HeaderValue::from_str(&format!("max-age={}", self.hsts_max_age_seconds)).ok()
    }
}

/// X-Frame-Options header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    /// Returns the header value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// Referrer-Policy header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    NoReferrer,
    SameOrigin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    /// Returns the header value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::SameOrigin => "same-origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into(), "bad\norigin".into()],
            ..CorsConfig::default()
        };
        assert_eq!(config.to_header_values().len(), 1);
        assert_eq!(CorsConfig::default().to_header_values().len(), 4);
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into(), " * ".into()],
            ..CorsConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.to_header_values().len(), 1);
        assert!(CorsConfig::default().validate().is_ok());
    }

    #[tokio::test]
    async fn wildcard_origin_does_not_break_router() -> anyhow::Result<()> {
        let cors = CorsConfig {
            allowed_origins: vec!["*".into()],
            ..CorsConfig::default()
        };
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_security(&cors, &SecurityHeadersConfig::default());
        let server = TestServer::new(app)?;

        server.get("/").await.assert_status_ok();
        Ok(())
    }

    #[test]
    fn hsts_can_be_disabled() {
        let headers = SecurityHeadersConfig {
            hsts_max_age_seconds: 0,
            ..SecurityHeadersConfig::default()
        };
        assert!(headers.hsts_header_value().is_none());
        assert!(SecurityHeadersConfig::default().hsts_header_value().is_some());
    }

    #[tokio::test]
    async fn responses_carry_security_headers() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_default_security();
        let server = TestServer::new(app)?;

        let response = server.get("/").await;
        response.assert_header("x-frame-options", "DENY");
        response.assert_header("x-content-type-options", "nosniff");
        Ok(())
    }
}
