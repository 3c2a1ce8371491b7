//! # Status Check Records
//!
//! The single persisted entity of the service and the request payload that
//! creates it.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::utils::validator::{normalize_client_name, validate_client_name};

/// A recorded status check.
///
/// Records are immutable once created: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    /// Owner of the record, `None` only for rows written without authentication
    pub user_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl StatusCheck {
    /// Builds a new record with a fresh id and the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision the
    /// database keeps, so the returned record equals what is later read back.
    pub fn new(client_name: String, user_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name,
            user_id,
            timestamp: now_micros(),
        }
    }
}

fn now_micros() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000))
}

/// Request payload for `POST /api/status`
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStatusCheckRequest {
    #[validate(custom(function = "validate_client_name"))]
    pub client_name: String,
}

impl CreateStatusCheckRequest {
    /// Validates the payload and returns the trimmed client name.
    pub fn into_client_name(self) -> AppResult<String> {
        self.validate()?;
        Ok(normalize_client_name(&self.client_name)?)
    }
}
