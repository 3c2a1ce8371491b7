use std::sync::Arc;

use tracing::info;

use crate::services::{jwt::JwtService, store::StatusStore};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Persistence for status checks.
    pub store: Arc<dyn StatusStore>,
    /// Verifier for bearer tokens.
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(store: Arc<dyn StatusStore>, jwt_service: JwtService) -> Self {
        info!("Initializing application state");
        Self { store, jwt_service }
    }
}
