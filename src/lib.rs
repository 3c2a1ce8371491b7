//! # Status API - Status Check Backend
//!
//! Records client-submitted status checks and lists them back, scoped to the
//! caller identified by a bearer token.
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration with fail-fast validation
//! - [`error`] - Error taxonomy and its HTTP mapping
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Bearer token authentication
//! - [`models`] - Records, request payloads and shared state
//! - [`services`] - Token verification and persistence
//! - [`telemetry`] - Structured logging setup
//! - [`utils`] - Constants, secrets and validators

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    response::Response,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::Config;
use crate::error::internal_error_response;
use crate::handlers::{create_status_check, health_check, list_status_checks, root};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::services::jwt::JwtService;
use crate::services::store::{PgStatusStore, StatusStore};

/// Creates an Axum router persisting status checks in PostgreSQL.
///
/// This is a convenience function that calls [`app_with_store`] with a
/// [`PgStatusStore`] over `db_pool`.
#[inline]
pub fn app(db_pool: PgPool, config: &Config) -> Router {
    app_with_store(Arc::new(PgStatusStore::new(db_pool)), config)
}

/// Creates an Axum router with application routes and state.
///
/// # Routes
///
/// - `GET /health-check` - liveness, public
/// - `GET /api/` - greeting, public
/// - `POST /api/status` - record a status check, bearer token required
/// - `GET /api/status` - list own status checks, bearer token required
///
/// Every route is wrapped in request tracing, CORS restricted to the
/// configured origins, and a panic guard answering with the generic
/// internal error body.
pub fn app_with_store(store: Arc<dyn StatusStore>, config: &Config) -> Router {
    let jwt_service = JwtService::new(&config.jwt_secret);
    let state = Arc::new(AppState::new(store, jwt_service));

    let protected_routes = Router::new()
        .route(
            "/api/status",
            post(create_status_check).get(list_status_checks),
        )
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new()
        .route("/health-check", get(health_check))
        .route("/api", get(root))
        .route("/api/", get(root));

    info!(origins = config.cors_origins.len(), "Configuring CORS");

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(config.cors_origins.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = %message, "Request handler panicked");
    internal_error_response()
}
