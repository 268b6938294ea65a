//! # Health Check Handler
//!
//! Liveness endpoint for load balancers and deployment tooling.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Health check endpoint that returns 200 OK.
///
/// Indicates the process is up and serving HTTP. It does not touch the
/// database, so a datastore outage does not fail it.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
