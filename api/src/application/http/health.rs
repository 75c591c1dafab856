use axum::{Json, Router, extract::State, routing::get};
use nutriclinic_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LiveResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReadyResponse {
    pub data: DatabaseHealthStatus,
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    summary = "Liveness probe",
    responses((status = 200, body = LiveResponse))
)]
pub async fn live() -> Json<LiveResponse> {
    Json(LiveResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Pings the storage backend.",
    responses(
        (status = 200, body = ReadyResponse),
        (status = 503, description = "Storage backend unreachable")
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<Response<ReadyResponse>, ApiError> {
    let status = state.service.readness().await.map_err(|e| {
        ApiError::ServiceUnavailable(format!("storage backend is not ready: {}", e))
    })?;

    Ok(Response::OK(ReadyResponse { data: status }))
}

#[derive(OpenApi)]
#[openapi(paths(live, ready))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/health/live", root_path), get(live))
        .route(&format!("{}/health/ready", root_path), get(ready))
}
