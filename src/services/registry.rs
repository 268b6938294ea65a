//! # Indicator Update Registry
//!
//! The three operations the HTTP surface exposes: list the indicators
//! updated inside the recent window, record an update, and remove every
//! record of an indicator.

use std::collections::BTreeSet;
use std::sync::Arc;

use time::{Date, OffsetDateTime};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::services::store::IndicatorStore;
use crate::utils::constant::{INSERT_MISMATCH_MESSAGE, NOT_FOUND_MESSAGE, RECENT_WINDOW};

/// First date still considered recent when the current date is `today`.
pub fn recent_cutoff(today: Date) -> Date {
    today.saturating_sub(RECENT_WINDOW)
}

/// Collapses repeated names into one entry each, sorted by name.
pub fn distinct_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Current date in UTC.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub struct IndicatorRegistry {
    store: Arc<dyn IndicatorStore>,
}

impl IndicatorRegistry {
    pub fn new(store: Arc<dyn IndicatorStore>) -> Self {
        Self { store }
    }

    /// Lists the distinct indicators updated in the last 30 days.
    pub async fn list_recent(&self) -> AppResult<Vec<String>> {
        self.list_recent_as_of(today()).await
    }

    /// Same as [`Self::list_recent`] with an explicit notion of "today".
    #[instrument(skip(self))]
    pub async fn list_recent_as_of(&self, today: Date) -> AppResult<Vec<String>> {
        let cutoff = recent_cutoff(today);
        let rows = self.store.updated_since(cutoff).await?;
        let row_count = rows.len();
        let names = distinct_names(rows);

        debug!(%cutoff, row_count, distinct = names.len(), "Collected recent indicators");
        Ok(names)
    }

    /// Records that `indicator` was updated today. Re-adding a name stores
    /// another row rather than touching the existing ones.
    ///
    /// # Errors
    ///
    /// - [`AppError::Storage`] if the datastore rejects the insert
    /// - [`AppError::Integrity`] if the insert did not affect exactly one row
    #[instrument(skip(self))]
    pub async fn add(&self, indicator: &str) -> AppResult<()> {
        let rows_affected = self.store.insert(indicator).await?;

        if rows_affected != 1 {
            error!(rows_affected, "Insert affected an unexpected number of rows");
            return Err(AppError::Integrity(INSERT_MISMATCH_MESSAGE));
        }

        info!("Indicator update recorded");
        Ok(())
    }

    /// Removes every record of `indicator`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Storage`] if the datastore rejects the delete
    /// - [`AppError::NotFound`] if no row carried that name
    #[instrument(skip(self))]
    pub async fn remove(&self, indicator: &str) -> AppResult<()> {
        let rows_affected = self.store.delete(indicator).await?;

        if rows_affected == 0 {
            warn!("No rows matched indicator for deletion");
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE));
        }

        info!(rows_affected, "Indicator updates removed");
        Ok(())
    }
}
