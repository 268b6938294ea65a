//! # Indicator Handlers
//!
//! The three endpoints of the indicator collection. Listing is public;
//! adding and removing sit behind [`crate::middleware::basic_auth_middleware`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, IndicatorRequest, MessageResponse};
use crate::utils::constant::{EMPTY_NAME_MESSAGE, INVALID_BODY_MESSAGE};

/// Lists every indicator updated in the last 30 days.
///
/// GET {prefix}/indicators
///
/// # Returns
///
/// - `200 OK` with a JSON array of distinct indicator names (possibly empty)
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_indicators(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    debug!("Processing list indicators request");

    let indicators = state.registry.list_recent().await?;

    info!(count = indicators.len(), "Recent indicators retrieved");
    Ok(Json(indicators))
}

/// Records an update of the named indicator.
///
/// POST {prefix}/indicators
///
/// # Returns
///
/// - `201 Created` with `{"message": "success"}`
/// - `400 Bad Request` - Body is not `{"name": string}` or the name is empty
/// - `401 Unauthorized` - Missing or incorrect credentials
/// - `500 Internal Server Error` - Database error or unexpected row count
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn add_indicator(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IndicatorRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let request = validated(payload)?;
    debug!(indicator = %request.name, "Processing add indicator request");

    state.registry.add(&request.name).await?;

    info!(indicator = %request.name, "Indicator added");
    Ok((StatusCode::CREATED, Json(MessageResponse::success())))
}

/// Removes every record of the named indicator, e.g. one added by mistake.
///
/// DELETE {prefix}/indicators
///
/// # Returns
///
/// - `200 OK` with `{"message": "success"}`
/// - `400 Bad Request` - Body is not `{"name": string}` or the name is empty
/// - `401 Unauthorized` - Missing or incorrect credentials
/// - `404 Not Found` - No record carries that name
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn remove_indicator(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IndicatorRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let request = validated(payload)?;
    debug!(indicator = %request.name, "Processing remove indicator request");

    state.registry.remove(&request.name).await?;

    info!(indicator = %request.name, "Indicator removed");
    Ok(Json(MessageResponse::success()))
}

fn validated(payload: Result<Json<IndicatorRequest>, JsonRejection>) -> AppResult<IndicatorRequest> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "Rejected indicator request body");
        AppError::BadRequest(INVALID_BODY_MESSAGE)
    })?;

    if request.validate().is_err() {
        warn!("Empty indicator name provided");
        return Err(AppError::BadRequest(EMPTY_NAME_MESSAGE));
    }

    Ok(request)
}
