//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the location API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::application::services::location_service::LocationService;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::presentation::handlers;
use crate::session::interface::SessionClientFactory;

/// Shared state for axum request handlers.
pub struct AppState<F: SessionClientFactory> {
    pub service: Arc<LocationService<F>>,
}

impl<F: SessionClientFactory> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Builds the application router:
/// - GET / and GET /health
/// - GET and POST /get-device-location
pub fn router<F: SessionClientFactory + 'static>(service: Arc<LocationService<F>>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/get-device-location",
            get(handlers::get_device_location::<F>).post(handlers::post_device_location::<F>),
        )
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server<F: SessionClientFactory + 'static>(
    config: &ServerConfig,
    service: Arc<LocationService<F>>,
) -> Result<(), AppError> {
    let app = router(service);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind to {}: {}", addr, e);
        AppError::Io(e)
    })?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
