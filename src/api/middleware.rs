//! Request middleware

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::auth::extract_credential;
use crate::utils::AuthError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Resolve the API key of the request and attach the caller's
/// [`RequestContext`](crate::models::RequestContext) as an extension
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw_key = extract_credential(req.headers()).ok_or(AuthError::MissingCredential)?;

    let ctx = state
        .credentials
        .authenticate(&raw_key, chrono::Utc::now())
        .map_err(|e| {
            tracing::debug!("Rejected credential on {}: {}", req.uri().path(), e);
            e
        })?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Permissive CORS; the API is called from browser frontends on other origins
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
