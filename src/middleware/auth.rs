//! # Authentication Middleware
//!
//! This module contains the authentication middleware that verifies bearer
//! tokens and provides the caller identity to protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};

use crate::error::AppError;
use crate::models::AppState;

/// Authentication middleware for protecting routes
///
/// # Authentication Flow
///
/// 1. Reads the `Authorization` header, expecting `Bearer <token>`
/// 2. Verifies the token signature, audience and expiration
/// 3. Adds the [`CallerIdentity`](crate::services::jwt::CallerIdentity) to
///    request extensions for handler access
///
/// # Returns
///
/// - **Success**: Continues to next handler with caller context
/// - **Failure**: `401 Unauthorized` with a `detail` distinguishing a missing
///   header, an expired token and an otherwise invalid token
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    trace!("Processing authentication middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let identity = state.jwt_service.authenticate(auth_header).map_err(|e| {
        warn!(error = %e, "Authentication failed");
        AppError::from(e)
    })?;

    debug!(user_id = %identity.user_id, "Authentication successful");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
