//! Routes, CORS and request tracing.

use super::handlers;
use crate::sessions::SessionRegistry;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// - `GET /health`
/// - `POST /predict` - `{"ecg_value": f64, "session_id"?: str}`
/// - `POST /sessions` - open a session under a fresh id
/// - `DELETE /sessions/:id` - drop a session and its window
pub fn create_router(registry: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/predict", post(handlers::predict_handler))
        .route("/sessions", post(handlers::create_session_handler))
        .route("/sessions/:id", delete(handlers::delete_session_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Serve until Ctrl+C.
pub async fn start_server(
    registry: Arc<SessionRegistry>,
    bind_addr: &str,
) -> Result<(), std::io::Error> {
    let app = create_router(registry);

    tracing::info!(bind_addr, "starting ECG prediction API");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await?;

    Ok(())
}
