//! Static status endpoints.

use axum::Json;
use chrono::Local;
use tracing::info;

use crate::models::{HealthResponse, RootResponse};

/// `GET /` — confirms the service is up.
pub async fn root_handler() -> Json<RootResponse> {
    info!("root path requested");
    Json(RootResponse {
        message: "AI Chat Backend is running!".into(),
    })
}

/// `GET /health` — liveness probe. Does not touch the relay or the upstream.
pub async fn health_handler() -> Json<HealthResponse> {
    info!("health check requested");
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Local::now().to_rfc3339(),
    })
}
