//! Time-lookup backend adapter
//!
//! The time backend predates the generic invocation shapes: its single
//! tool is served by `GET /current-time`, which returns a bare JSON string
//! rather than an object. This adapter tries that convention first and
//! falls back to the generic shapes when it fails.

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use toolgate_core::{BackendStatus, Discovery, GatewayResult, HealthState, ToolBackend};

use crate::config::BackendConfig;
use crate::generic::HttpToolBackend;

/// Tool served by the GET-based convention
const TIME_TOOL: &str = "get_current_time";
/// Path of the GET-based convention
const TIME_PATH: &str = "current-time";

/// Adapter for the time-lookup backend convention
pub struct TimeToolBackend {
    inner: HttpToolBackend,
}

impl TimeToolBackend {
    /// Create an adapter from a config entry.
    ///
    /// The static fallback list defaults to `["get_current_time"]` so the
    /// backend stays usable even without any discovery endpoint.
    pub fn from_config(cfg: &BackendConfig) -> GatewayResult<Self> {
        let mut static_tools = cfg.effective_static_tools();
        if static_tools.is_empty() {
            static_tools.push(TIME_TOOL.to_string());
        }
        Ok(Self {
            inner: HttpToolBackend::new(&cfg.name, &cfg.url, static_tools, cfg.timeouts)?,
        })
    }
}

#[async_trait]
impl ToolBackend for TimeToolBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    fn health(&self) -> HealthState {
        self.inner.health()
    }

    fn status(&self) -> BackendStatus {
        self.inner.status()
    }

    async fn check_health(&self) -> HealthState {
        self.inner.check_health().await
    }

    async fn discover(&self) -> Discovery {
        self.inner.discover().await
    }

    async fn invoke(
        &self,
        tool: &str,
        params: &serde_json::Value,
    ) -> GatewayResult<serde_json::Value> {
        if tool == TIME_TOOL {
            match self.inner.probe().get_text(TIME_PATH).await {
                Ok(raw) => {
                    return Ok(serde_json::json!({
                        "success": true,
                        "output": strip_json_string(&raw),
                    }));
                }
                Err(e) => {
                    warn!(backend = %self.name(), error = %e, "GET convention failed, trying generic shapes");
                }
            }
        }

        self.inner.invoke(tool, params).await
    }
}

/// Strip the surrounding quote characters from a raw JSON string response
fn strip_json_string(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}
