//! Router assembly and the HTTP server loop

use crate::api::state::AppState;
use crate::api::{middleware, routes};
use crate::utils::ToolkitError;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// The `/api/v1` routes sit behind API key authentication; `/health`,
/// `/scan-certificate` and `/send-email` are open.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/certificates", get(routes::list_certificates))
        .route("/certificates/:fingerprint", get(routes::get_certificate))
        .route("/scans", post(routes::create_scan))
        .route("/alerts", get(routes::list_alerts))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .route("/scan-certificate", post(routes::scan_certificate))
        .route("/send-email", post(routes::send_email))
        .nest("/api/v1", protected)
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), ToolkitError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("cert-warden API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cert-warden API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
