use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use validator::Validate;

use crate::utils::constant::SUCCESS_MESSAGE;

/// One row of the `updates` table: a single recorded update of an indicator.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct IndicatorUpdate {
    pub id: i32,
    pub indicator: String,
    pub updated: Date,
}

/// Request payload for adding or removing an indicator
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IndicatorRequest {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Acknowledgment body shared by success and error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}
