//! # Indicator Updates - Tracking Progress Update Registry
//!
//! A small HTTP API recording which Tracking Progress indicators were
//! recently updated. The intranet form adds and removes names; the Tracking
//! Progress app lists the names updated in the last 30 days and badges them.
//!
//! ## Modules
//!
//! - [`config`] - Startup configuration read from the environment
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Basic authentication for the write endpoints
//! - [`services`] - The registry operations and the datastore seam
//! - [`telemetry`] - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::handlers::{add_indicator, health_check, list_indicators, remove_indicator};
use crate::middleware::basic_auth_middleware;
use crate::models::AppState;
use crate::services::store::IndicatorStore;

/// Creates the Axum router for the service.
///
/// # Arguments
///
/// * `config` - Startup configuration; the credentials move into the state
/// * `store` - Datastore behind the registry. Production passes a
///   [`services::store::PgIndicatorStore`], tests pass their own.
///
/// # Returns
///
/// A router serving `GET`, `POST` and `DELETE` on `{prefix}/indicators`
/// plus `GET /health-check`, with CORS and request tracing applied.
pub fn app(config: AppConfig, store: Arc<dyn IndicatorStore>) -> Router {
    let cors = cors_layer(config.allowed_origins);
    let indicators_path = format!("{}/indicators", config.api_prefix);
    info!(%indicators_path, "Mounting indicator routes");

    let state = Arc::new(AppState::new(store, config.credentials));

    let write_routes = post(add_indicator)
        .delete(remove_indicator)
        .route_layer(from_fn_with_state(Arc::clone(&state), basic_auth_middleware));

    Router::new()
        .route("/health-check", get(health_check))
        .route(&indicators_path, get(list_indicators).merge(write_routes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Browser access is limited to the configured origins. Credentials are
/// allowed, so request headers are mirrored rather than wildcarded.
fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
}
