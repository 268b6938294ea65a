use std::sync::Arc;

use tracing::info;

use crate::middleware::BasicCredentials;
use crate::services::registry::IndicatorRegistry;
use crate::services::store::IndicatorStore;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The indicator registry, backed by whichever store was supplied.
    pub registry: IndicatorRegistry,
    /// Credentials required by the write endpoints.
    pub credentials: BasicCredentials,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Datastore the registry reads and writes
    /// * `credentials` - Basic-auth credentials for add and remove
    pub fn new(store: Arc<dyn IndicatorStore>, credentials: BasicCredentials) -> Self {
        info!("Initializing application state");

        Self {
            registry: IndicatorRegistry::new(store),
            credentials,
        }
    }
}
