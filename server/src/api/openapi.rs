//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{datasets, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BusBoard API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Regional bus listing dashboard"
    ),
    tags(
        (name = "health", description = "Liveness endpoint"),
        (name = "datasets", description = "Bus listing datasets, filters and rows")
    ),
    paths(
        health::health,
        datasets::list_datasets,
        datasets::get_filter_options,
        datasets::list_buses,
        datasets::get_view,
    ),
    components(schemas(
        health::HealthResponse,
        datasets::types::DatasetDto,
        datasets::types::DatasetListResponse,
        datasets::types::BusDto,
        datasets::types::BusListResponse,
        datasets::types::PriceBounds,
        datasets::types::RatingBounds,
        datasets::types::FilterOptionsResponse,
        datasets::types::ViewResponse,
        datasets::types::BusFilterQuery,
        datasets::types::ViewQuery,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}
