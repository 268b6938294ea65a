//! # Centralized Error Handling
//!
//! Every handler returns [`AppResult`], and every failure is turned into a
//! JSON body of the form `{"message": "..."}` here, at the request boundary.
//! Nothing is retried and nothing is allowed to take the process down.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::store::StoreError;

/// Central application error type.
///
/// Storage errors are logged automatically when converted into a response;
/// the other variants are expected to be logged where they are raised.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("not found: {0}")]
    NotFound(&'static str),

    /// A statement affected an unexpected number of rows. This is a backend
    /// bug, not something the caller did.
    #[error("integrity error: {0}")]
    Integrity(&'static str),

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Storage(_) | AppError::Integrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage(e) = &self {
            error!(?e, "Storage error occurred");
        }

        let status = self.status_code();
        let message = match &self {
            AppError::Storage(e) => format!("Database error: {e}"),
            AppError::NotFound(msg)
            | AppError::Integrity(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg) => (*msg).to_string(),
        };

        let mut response = (status, Json(ErrorBody { message })).into_response();
        if matches!(self, AppError::Unauthorized(_)) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
