//! # Indicator Store
//!
//! The datastore seam of the service. Handlers never touch a connection
//! directly; they go through an [`IndicatorStore`] supplied when the router is
//! built, so tests can swap the Postgres store for one of their own.
//!
//! ## Implementations
//!
//! - [`PgIndicatorStore`] - Production store over the `updates` table

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::Date;
use tracing::{debug, error, instrument};

/// Errors that can occur while talking to the datastore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failure reported by a non-SQL backend.
    #[error("{0}")]
    Backend(String),
}

/// Persistence for indicator update records.
///
/// Every method maps to exactly one statement. Implementations acquire a
/// connection for the duration of that statement and release it on every
/// exit path.
#[async_trait]
pub trait IndicatorStore: Send + Sync {
    /// Returns the indicator name of every row dated on or after `cutoff`.
    /// Names are returned once per row, so duplicates are expected.
    async fn updated_since(&self, cutoff: Date) -> Result<Vec<String>, StoreError>;

    /// Inserts one row dated today and returns the number of rows affected.
    async fn insert(&self, indicator: &str) -> Result<u64, StoreError>;

    /// Deletes every row whose name matches exactly and returns how many went.
    async fn delete(&self, indicator: &str) -> Result<u64, StoreError>;
}

/// Store backed by the PostgreSQL `updates` table.
#[derive(Clone)]
pub struct PgIndicatorStore {
    db_pool: PgPool,
}

impl PgIndicatorStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl IndicatorStore for PgIndicatorStore {
    #[instrument(skip(self))]
    async fn updated_since(&self, cutoff: Date) -> Result<Vec<String>, StoreError> {
        let mut conn = self.db_pool.acquire().await.inspect_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
        })?;

        let names =
            sqlx::query_scalar::<_, String>("SELECT indicator FROM updates WHERE updated >= $1")
                .bind(cutoff)
                .fetch_all(&mut *conn)
                .await?;

        debug!(rows = names.len(), "Fetched recent update rows");
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn insert(&self, indicator: &str) -> Result<u64, StoreError> {
        let mut conn = self.db_pool.acquire().await.inspect_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
        })?;

        let result = sqlx::query("INSERT INTO updates (indicator) VALUES ($1)")
            .bind(indicator)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, indicator: &str) -> Result<u64, StoreError> {
        let mut conn = self.db_pool.acquire().await.inspect_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
        })?;

        let result = sqlx::query("DELETE FROM updates WHERE indicator = $1")
            .bind(indicator)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
