//! Application state for the gateway API

use std::sync::Arc;

use toolgate_core::BackendCatalog;
use toolgate_gateway::{MetricsRecorder, ToolRegistry, ToolRouter};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ToolRegistry>,
    router: Arc<ToolRouter>,
    metrics: Arc<MetricsRecorder>,
}

impl AppState {
    /// Build the full gateway stack over a backend catalog
    pub fn new(catalog: BackendCatalog) -> Self {
        let registry = Arc::new(ToolRegistry::new(catalog));
        let metrics = Arc::new(MetricsRecorder::new());
        let router = Arc::new(ToolRouter::new(
            Arc::clone(&registry),
            Arc::clone(&metrics),
        ));
        Self {
            registry,
            router,
            metrics,
        }
    }

    /// The tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The request router
    pub fn router(&self) -> &ToolRouter {
        &self.router
    }

    /// The metrics recorder
    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}
