//! HUC12 Service - HTTP microservice for subwatershed lookups.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HUC12_SERVICE_URL` | WBD feature service query endpoint | Oregon DEQ WBD layer |
//! | `HUC12_REGION` | Advisory bounds `min_lon,min_lat,max_lon,max_lat` | Oregon |
//! | `HUC12_REGION_NAME` | Region name used in warnings | `Oregon` |
//! | `HUC12_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log filter (e.g., "info", "huc12=debug") | see below |
//!
//! ## Endpoints
//!
//! - `GET /huc12?x=X&y=Y&crs=C` - Look up one point
//! - `POST /huc12` - Vectorized lookup returning rows
//! - `POST /huc12/codes` - Vectorized lookup returning codes
//! - `POST /huc12/names` - Vectorized lookup returning names
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use huc12::Huc12ServiceBuilder;
use huc12_service::{router, AppState};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huc12=info,huc12_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("HUC12_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // The blocking HTTP client owns its own runtime. It is created here,
    // before tokio starts, and `state` outlives the server runtime below.
    let huc12_service = Huc12ServiceBuilder::from_env()?.build()?;

    tracing::info!(
        service_url = %huc12_service.service_url(),
        region = %huc12_service.region().name,
        port = port,
        "Starting HUC12 service"
    );

    let state = Arc::new(AppState { huc12_service });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(Arc::clone(&state), port))?;
    drop(runtime);

    drop(state);
    Ok(())
}

async fn serve(state: Arc<AppState>, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
