//! HUC12 Service Library
//!
//! HTTP handlers, OpenAPI document and router for the HUC12 lookup service.
//! This library is used by both the huc12-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use huc12::Huc12Service;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Lookup service backed by the WBD feature service.
    pub huc12_service: Huc12Service,
}

/// OpenAPI documentation for the HUC12 service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HUC12 Lookup Service",
        version = "0.1.0",
        description = "REST API resolving coordinates to 12-digit hydrologic unit codes.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_huc12,
        handlers::post_huc12,
        handlers::post_huc12_codes,
        handlers::post_huc12_names,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::CrsParam,
            handlers::BatchRequest,
            huc12::Huc12Record,
            handlers::LookupResponse,
            handlers::TableResponse,
            handlers::ValuesResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "huc12", description = "Subwatershed lookup endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router, including Swagger UI at `/docs`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/huc12",
            get(handlers::get_huc12).post(handlers::post_huc12),
        )
        .route("/huc12/codes", post(handlers::post_huc12_codes))
        .route("/huc12/names", post(handlers::post_huc12_names))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    BatchRequest, ErrorResponse, HealthResponse, Huc12Query, LookupResponse,
    TableResponse, ValuesResponse,
};
