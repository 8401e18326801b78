//! Shared application state.

use gateway_routing::Dispatcher;
use gateway_telemetry::Metrics;
use std::sync::Arc;

/// State shared by every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Model dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Prometheus metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create the state
    #[must_use]
    pub fn new(dispatcher: Dispatcher, metrics: Arc<Metrics>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            metrics,
        }
    }
}
