//! # Health Check Handler
//!
//! Liveness endpoint served outside the `/api` prefix, without
//! authentication.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Liveness check for load balancers and orchestrators.
///
/// GET /health-check
///
/// Answers `200 OK` with an empty body as long as the process serves HTTP.
/// The store is not consulted.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
