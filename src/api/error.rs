//! HTTP error responses

use crate::utils::{AuthError, NotifyError, ScanError, ScanErrorKind, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body of every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScanErrorKind>,
}

/// Errors returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Insufficient permissions: {0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Scan(e) if e.kind() == ScanErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Scan(_) | ApiError::Notify(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable code for authentication failures
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            ApiError::Unauthorized(AuthError::MissingCredential) => Some("unauthorized"),
            ApiError::Unauthorized(_) => Some("invalid_api_key"),
            ApiError::Forbidden(_) => Some("forbidden"),
            ApiError::NotFound(_) => Some("not_found"),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { what } => ApiError::NotFound(format!("{} not found", what)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            code: self.error_code(),
            kind: match &self {
                ApiError::Scan(e) => Some(e.kind()),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}
