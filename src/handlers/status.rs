//! # Status Check Handlers
//!
//! Endpoints recording and listing status checks. Both sit behind the
//! authentication middleware, so every record is owned by the caller that
//! created it and callers only ever see their own records.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tracing::{debug, info, instrument, warn};

use crate::error::AppResult;
use crate::models::{AppState, CreateStatusCheckRequest, ListQuery, Page, StatusCheck};
use crate::services::jwt::CallerIdentity;

/// Records a status check for the authenticated caller.
///
/// POST /api/status CreateStatusCheckRequest
///
/// The client name is trimmed, then checked for length (1-200 characters)
/// and allowed characters before the record is persisted.
///
/// # Returns
///
/// - `200 OK` with the created [`StatusCheck`]
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `422 Unprocessable Entity` - Malformed body or invalid client name
/// - `500 Internal Server Error` - Store failure
#[instrument(
    skip_all,
    fields(
        user_id = %caller.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn create_status_check(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    payload: Result<Json<CreateStatusCheckRequest>, JsonRejection>,
) -> AppResult<Json<StatusCheck>> {
    debug!("Processing status check creation");

    let Json(payload) = payload?;
    let client_name = payload
        .into_client_name()
        .inspect_err(|e| warn!(error = %e, "Client name rejected"))?;

    let check = StatusCheck::new(client_name, Some(caller.user_id));
    state.store.insert(&check).await?;

    info!(status_check_id = %check.id, "Status check recorded");
    Ok(Json(check))
}

/// Lists the caller's status checks in insertion order.
///
/// GET /api/status ?skip=0&limit=50
///
/// # Query Parameters
///
/// - `skip`: Records to skip (default: 0, negative values read as 0)
/// - `limit`: Records to return (default: 50, max: 100, min: 1)
///
/// # Returns
///
/// - `200 OK` with a JSON array of [`StatusCheck`]
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `422 Unprocessable Entity` - Non-numeric `skip`/`limit`
/// - `500 Internal Server Error` - Store failure
#[instrument(
    skip_all,
    fields(
        user_id = %caller.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn list_status_checks(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<StatusCheck>>> {
    let Query(query) = query?;
    let page = Page::from(query);
    debug!(skip = page.skip, limit = page.limit, "Listing status checks");

    let checks = state.store.list_for_user(&caller.user_id, page).await?;

    debug!(count = checks.len(), "Status checks listed");
    Ok(Json(checks))
}
