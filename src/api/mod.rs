//! HTTP API
//!
//! Open endpoints for ad-hoc scans and test e-mails, plus tenant-scoped
//! `/api/v1` endpoints authenticated by API key.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{router, serve};
pub use state::AppState;
