use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Greeting served at the API root.
///
/// GET /api/
///
/// No authentication required.
#[instrument]
pub async fn root() -> Json<MessageResponse> {
    debug!("API root accessed");
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}
