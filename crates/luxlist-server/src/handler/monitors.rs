//! Health check handler.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;

/// Reports that the server is accepting requests.
///
/// Backing services are not probed.
#[tracing::instrument(skip_all)]
async fn health_status() -> (StatusCode, Json<MonitorStatus>) {
    (StatusCode::OK, Json(MonitorStatus::default()))
}

/// Returns a [`Router`] with the monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_is_public() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
        Ok(())
    }
}
