//! Liveness endpoint

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::DatasetService;

#[derive(Clone)]
pub struct HealthApiState {
    pub database: Arc<DatasetService>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Configured database backend (`sqlite` or `postgres`)
    pub backend: String,
}

pub fn routes(database: Arc<DatasetService>) -> Router<()> {
    Router::new()
        .route("/", get(health))
        .with_state(HealthApiState { database })
}

/// Liveness check. Reports the configured backend without opening a connection.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<HealthApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.database.backend().to_string(),
    })
}
