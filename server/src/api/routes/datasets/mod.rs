//! Dataset API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{DatasetPath, ValidatedQuery};
use crate::api::types::ApiError;
use crate::core::config::FiltersConfig;
use crate::data::types::Dataset;
use crate::data::{DatasetRegistry, DatasetService};
use crate::domain::buses::render_pass;

use types::{
    BusDto, BusFilterQuery, BusListResponse, DatasetDto, DatasetListResponse,
    FilterOptionsResponse, ViewQuery, ViewResponse,
};

/// Shared state for Dataset API endpoints
#[derive(Clone)]
pub struct DatasetsApiState {
    pub database: Arc<DatasetService>,
    pub registry: Arc<DatasetRegistry>,
    pub filters: FiltersConfig,
}

impl DatasetsApiState {
    fn dataset(&self, id: &str) -> Result<&Dataset, ApiError> {
        self.registry.get(id).map_err(ApiError::from_data)
    }
}

/// Build Dataset API routes
pub fn routes(
    database: Arc<DatasetService>,
    registry: Arc<DatasetRegistry>,
    filters: FiltersConfig,
) -> Router<()> {
    let state = DatasetsApiState {
        database,
        registry,
        filters,
    };

    Router::new()
        .route("/", get(list_datasets))
        .route("/{dataset}/filter-options", get(get_filter_options))
        .route("/{dataset}/buses", get(list_buses))
        .route("/{dataset}/view", get(get_view))
        .with_state(state)
}

/// List configured datasets
#[utoipa::path(
    get,
    path = "/api/v1/datasets",
    tag = "datasets",
    responses(
        (status = 200, description = "Configured datasets", body = DatasetListResponse)
    )
)]
pub async fn list_datasets(State(state): State<DatasetsApiState>) -> Json<DatasetListResponse> {
    let data = state.registry.list().iter().map(DatasetDto::from).collect();
    Json(DatasetListResponse { data })
}

/// Filter catalogs and slider bounds for a dataset
#[utoipa::path(
    get,
    path = "/api/v1/datasets/{dataset}/filter-options",
    tag = "datasets",
    params(
        ("dataset" = String, Path, description = "Dataset id")
    ),
    responses(
        (status = 200, description = "Filter options", body = FilterOptionsResponse),
        (status = 404, description = "Dataset not found")
    )
)]
pub async fn get_filter_options(
    State(state): State<DatasetsApiState>,
    path: DatasetPath,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let dataset = state.dataset(&path.dataset)?;

    let view = render_pass(&state.database, dataset, None)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(FilterOptionsResponse::new(
        dataset,
        view,
        &state.filters,
    )))
}

/// Rows matching the filters
#[utoipa::path(
    get,
    path = "/api/v1/datasets/{dataset}/buses",
    tag = "datasets",
    params(
        ("dataset" = String, Path, description = "Dataset id"),
        ("bus_type" = Option<String>, Query, description = "Exact bus type, \"All\" for any"),
        ("route" = Option<String>, Query, description = "Exact route name, \"All\" for any"),
        ("min_price" = Option<i64>, Query, description = "Inclusive lower price bound (default 0)"),
        ("max_price" = Option<i64>, Query, description = "Inclusive upper price bound"),
        ("min_rating" = Option<f64>, Query, description = "Inclusive lower rating bound (default 0.0)"),
        ("max_rating" = Option<f64>, Query, description = "Inclusive upper rating bound (default 5.0)")
    ),
    responses(
        (status = 200, description = "Matching rows", body = BusListResponse),
        (status = 400, description = "Invalid filters"),
        (status = 404, description = "Dataset not found"),
        (status = 500, description = "Query failed or a stored interval is malformed")
    )
)]
pub async fn list_buses(
    State(state): State<DatasetsApiState>,
    path: DatasetPath,
    ValidatedQuery(query): ValidatedQuery<BusFilterQuery>,
) -> Result<Json<BusListResponse>, ApiError> {
    let dataset = state.dataset(&path.dataset)?;
    let selection = query.into_selection(dataset.clone(), &state.filters)?;

    let mut session = state
        .database
        .acquire()
        .await
        .map_err(ApiError::from_data)?;
    let rows = session
        .fetch_filtered(&selection)
        .await
        .map_err(ApiError::from_data)?;

    let data: Vec<BusDto> = rows.into_iter().map(BusDto::from).collect();
    Ok(Json(BusListResponse {
        dataset: dataset.id.clone(),
        count: data.len(),
        data,
    }))
}

/// One render pass: catalogs, plus rows when `submit=true`
#[utoipa::path(
    get,
    path = "/api/v1/datasets/{dataset}/view",
    tag = "datasets",
    params(
        ("dataset" = String, Path, description = "Dataset id"),
        ("submit" = Option<bool>, Query, description = "Run the filtered query"),
        ("bus_type" = Option<String>, Query, description = "Exact bus type, \"All\" for any"),
        ("route" = Option<String>, Query, description = "Exact route name, \"All\" for any"),
        ("min_price" = Option<i64>, Query, description = "Inclusive lower price bound (default 0)"),
        ("max_price" = Option<i64>, Query, description = "Inclusive upper price bound"),
        ("min_rating" = Option<f64>, Query, description = "Inclusive lower rating bound (default 0.0)"),
        ("max_rating" = Option<f64>, Query, description = "Inclusive upper rating bound (default 5.0)")
    ),
    responses(
        (status = 200, description = "Rendered view", body = ViewResponse),
        (status = 400, description = "Invalid filters"),
        (status = 404, description = "Dataset not found"),
        (status = 500, description = "Query failed or a stored interval is malformed")
    )
)]
pub async fn get_view(
    State(state): State<DatasetsApiState>,
    path: DatasetPath,
    ValidatedQuery(query): ValidatedQuery<ViewQuery>,
) -> Result<Json<ViewResponse>, ApiError> {
    let dataset = state.dataset(&path.dataset)?;
    let selection = query
        .into_submission()
        .map(|filters| filters.into_selection(dataset.clone(), &state.filters))
        .transpose()?;

    let view = render_pass(&state.database, dataset, selection.as_ref())
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(ViewResponse::new(dataset, view)))
}
