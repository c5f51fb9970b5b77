//! Request router - resolves a tool to its backend and dispatches
//!
//! Resolution consults the registry; a miss triggers exactly one refresh
//! (covering tools registered after the last pass) before giving up with
//! `UnknownTool`. Dispatch is delegated to the owning backend adapter,
//! and the metrics recorder wraps only the network call.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use toolgate_core::{ExecutionOutcome, GatewayError, GatewayResult, ToolBackend};

use crate::metrics::{MetricsRecorder, Outcome};
use crate::registry::ToolRegistry;

/// Routes tool invocations to the owning backend
pub struct ToolRouter {
    registry: Arc<ToolRegistry>,
    metrics: Arc<MetricsRecorder>,
}

impl ToolRouter {
    /// Create a router over a registry and metrics recorder
    pub fn new(registry: Arc<ToolRegistry>, metrics: Arc<MetricsRecorder>) -> Self {
        Self { registry, metrics }
    }

    /// Resolve a tool, refreshing the registry at most once on a miss
    async fn resolve_backend(&self, tool: &str) -> GatewayResult<Arc<dyn ToolBackend>> {
        if let Some(backend) = self.registry.backend_for(tool) {
            return Ok(backend);
        }

        debug!(tool = %tool, "Tool not in registry, refreshing once");
        self.registry.refresh().await;

        self.registry
            .backend_for(tool)
            .ok_or_else(|| GatewayError::UnknownTool(tool.to_string()))
    }

    /// Invoke a tool by name with a JSON parameters object
    pub async fn invoke(
        &self,
        tool: &str,
        params: &serde_json::Value,
    ) -> GatewayResult<ExecutionOutcome> {
        let backend = self.resolve_backend(tool).await?;

        let start = Instant::now();
        let result = backend.invoke(tool, params).await;
        let elapsed = start.elapsed();
        self.metrics.observe(tool, elapsed);

        match result {
            Ok(output) => {
                self.metrics.record(tool, Outcome::Success);
                info!(tool = %tool, backend = %backend.name(), elapsed_ms = elapsed.as_millis() as u64, "Tool executed");
                Ok(ExecutionOutcome {
                    success: true,
                    output,
                    error: None,
                    elapsed,
                })
            }
            Err(e) => {
                self.metrics.record(tool, Outcome::Error);
                Err(e)
            }
        }
    }
}
