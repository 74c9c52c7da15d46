//! HTTP request handlers for the HUC12 lookup service.
//!
//! Lookups block on the upstream feature service, so every handler moves the
//! work onto the blocking pool.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use huc12::{Crs, Huc12Error, Huc12Record, Point};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

fn default_crs() -> String {
    Crs::default().to_string()
}

/// Query parameters for the single-point endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct Huc12Query {
    /// First coordinate in `crs` (longitude for EPSG:4326).
    pub x: f64,
    /// Second coordinate in `crs` (latitude for EPSG:4326).
    pub y: f64,
    /// Spatial reference of the coordinates.
    #[serde(default = "default_crs")]
    #[param(default = "4326")]
    pub crs: String,
}

/// A spatial reference given either as an EPSG code or as text.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CrsParam {
    Code(u32),
    Text(String),
}

impl From<CrsParam> for Crs {
    fn from(param: CrsParam) -> Self {
        match param {
            CrsParam::Code(code) => Crs::from(code),
            CrsParam::Text(text) => Crs::from(text),
        }
    }
}

fn default_crs_list() -> Vec<CrsParam> {
    vec![CrsParam::Code(4326)]
}

/// Vectorized lookup request.
///
/// Inputs of length one are broadcast against the longest input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default = "default_crs_list")]
    pub crs: Vec<CrsParam>,
}

/// Single-point lookup response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LookupResponse {
    pub x: f64,
    pub y: f64,
    pub crs: String,
    /// One row per matched feature, or a single all-null row.
    pub matches: Vec<Huc12Record>,
    /// Advisory messages raised during the lookup.
    pub warnings: Vec<String>,
}

/// Table response for `POST /huc12`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub rows: Vec<Huc12Record>,
}

/// Column response for `POST /huc12/codes` and `POST /huc12/names`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValuesResponse {
    pub values: Vec<Option<String>>,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Map a lookup error to a status code and JSON body.
fn error_response(e: Huc12Error) -> Response {
    let status = match &e {
        Huc12Error::LengthMismatch { .. } => StatusCode::BAD_REQUEST,
        Huc12Error::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(error = %e, status = status.as_u16(), "HUC12 lookup failed");

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

fn join_error_response(e: tokio::task::JoinError) -> Response {
    tracing::error!(error = %e, "Lookup task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Lookup task failed: {}", e),
        }),
    )
        .into_response()
}

/// Run a blocking lookup against the shared service.
async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&huc12::Huc12Service) -> huc12::Result<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.huc12_service))
        .await
        .map_err(join_error_response)?
        .map_err(error_response)
}

/// Look up the subwatershed containing one point.
#[utoipa::path(
    get,
    path = "/huc12",
    tag = "huc12",
    params(Huc12Query),
    responses(
        (status = 200, description = "Lookup result; unresolved points yield a null row", body = LookupResponse),
        (status = 400, description = "Missing or invalid query parameters"),
        (status = 502, description = "Feature service unreachable", body = ErrorResponse)
    )
)]
pub async fn get_huc12(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Huc12Query>,
) -> Response {
    tracing::debug!(x = query.x, y = query.y, crs = %query.crs, "HUC12 query");

    let point = Point::new(query.x, query.y, query.crs.as_str());
    let lookup = match run_blocking(&state, move |service| service.lookup_point(&point)).await {
        Ok(lookup) => lookup,
        Err(response) => return response,
    };

    let response = LookupResponse {
        x: query.x,
        y: query.y,
        crs: query.crs,
        matches: lookup.records,
        warnings: lookup.warnings.iter().map(ToString::to_string).collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn split_request(request: BatchRequest) -> (Vec<f64>, Vec<f64>, Vec<Crs>) {
    let crs = request.crs.into_iter().map(Crs::from).collect();
    (request.x, request.y, crs)
}

/// Resolve many points into a table of rows.
#[utoipa::path(
    post,
    path = "/huc12",
    tag = "huc12",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Rows in input order", body = TableResponse),
        (status = 400, description = "Inputs cannot be broadcast together", body = ErrorResponse),
        (status = 502, description = "Feature service unreachable", body = ErrorResponse)
    )
)]
pub async fn post_huc12(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Response {
    let (x, y, crs) = split_request(request);
    tracing::debug!(points = x.len().max(y.len()), "HUC12 table query");

    match run_blocking(&state, move |service| service.lookup_table(&x, &y, &crs)).await {
        Ok(table) => Json(TableResponse {
            rows: table.into_rows(),
        })
        .into_response(),
        Err(response) => response,
    }
}

/// Resolve many points to their HUC12 codes.
#[utoipa::path(
    post,
    path = "/huc12/codes",
    tag = "huc12",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Codes in input order", body = ValuesResponse),
        (status = 400, description = "Inputs cannot be broadcast together", body = ErrorResponse),
        (status = 502, description = "Feature service unreachable", body = ErrorResponse)
    )
)]
pub async fn post_huc12_codes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Response {
    let (x, y, crs) = split_request(request);

    match run_blocking(&state, move |service| service.lookup_codes(&x, &y, &crs)).await {
        Ok(values) => Json(ValuesResponse { values }).into_response(),
        Err(response) => response,
    }
}

/// Resolve many points to their subwatershed names.
#[utoipa::path(
    post,
    path = "/huc12/names",
    tag = "huc12",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Names in input order", body = ValuesResponse),
        (status = 400, description = "Inputs cannot be broadcast together", body = ErrorResponse),
        (status = 502, description = "Feature service unreachable", body = ErrorResponse)
    )
)]
pub async fn post_huc12_names(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Response {
    let (x, y, crs) = split_request(request);

    match run_blocking(&state, move |service| service.lookup_names(&x, &y, &crs)).await {
        Ok(values) => Json(ValuesResponse { values }).into_response(),
        Err(response) => response,
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
