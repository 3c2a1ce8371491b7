//! # Status Check Store
//!
//! Persistence for status checks behind the [`StatusStore`] trait.
//!
//! ## Implementations
//!
//! - [`PgStatusStore`] - PostgreSQL-backed store used in production
//! - [`MemoryStatusStore`] - In-process store for development and testing
//!
//! Both return records in insertion order and never mutate a stored record.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

use crate::models::{Page, StatusCheck};

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for status check persistence
///
/// Every request performs at most one call against the store.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Persists a newly created status check.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    async fn insert(&self, check: &StatusCheck) -> Result<(), StoreError>;

    /// Lists the status checks owned by `user_id`, oldest first,
    /// windowed by `page`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the records cannot be read.
    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<StatusCheck>, StoreError>;
}

/// PostgreSQL-backed status check store
///
/// Rows live in the `status_checks` table created by the bundled migrations.
/// The identity column `seq` preserves insertion order.
pub struct PgStatusStore {
    pool: PgPool,
}

impl PgStatusStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for PgStatusStore {
    #[instrument(skip_all, fields(status_check_id = %check.id))]
    async fn insert(&self, check: &StatusCheck) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO status_checks (id, client_name, user_id, "timestamp")
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(check.id)
        .bind(&check.client_name)
        .bind(&check.user_id)
        .bind(check.timestamp)
        .execute(&self.pool)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to insert status check"))?;

        debug!("Status check inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<StatusCheck>, StoreError> {
        let checks = sqlx::query_as::<_, StatusCheck>(
            r#"
            SELECT id, client_name, user_id, "timestamp"
            FROM status_checks
            WHERE user_id = $1
            ORDER BY seq
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to list status checks"))?;

        debug!(count = checks.len(), "Status checks fetched");
        Ok(checks)
    }
}

/// In-memory status check store
///
/// Keeps records in a vector in insertion order. Contents are lost when the
/// process exits, so this is only meant for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    checks: RwLock<Vec<StatusCheck>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records, across all owners.
    pub async fn len(&self) -> usize {
        self.checks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.checks.read().await.is_empty()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn insert(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.checks.write().await.push(check.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<StatusCheck>, StoreError> {
        let checks = self.checks.read().await;

        Ok(checks
            .iter()
            .filter(|check| check.user_id.as_deref() == Some(user_id))
            .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
