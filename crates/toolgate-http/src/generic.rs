//! Generic multi-shape HTTP backend adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use toolgate_core::{
    BackendStatus, Discovery, DiscoverySource, GatewayResult, HealthState, ToolBackend,
};

use crate::client::ProbeClient;
use crate::config::{BackendConfig, ProbeTimeouts};

/// Mutable health record, written only by the health prober
#[derive(Debug, Clone, Copy)]
struct HealthCell {
    state: HealthState,
    last_probed: Option<DateTime<Utc>>,
}

/// Adapter for backends with no known endpoint convention.
///
/// Discovery probes `GET /tools`, `/mcp/tools`, `/api/tools` in order and
/// falls back to a static tool list when every probe misses. Invocation
/// tries `POST /mcp/tools/{tool}`, `/tools/{tool}`, `/{tool}`, `/execute`
/// in order.
pub struct HttpToolBackend {
    name: String,
    probe: ProbeClient,
    static_tools: Vec<String>,
    health: RwLock<HealthCell>,
}

impl HttpToolBackend {
    /// Create an adapter from explicit parts
    pub fn new(
        name: &str,
        base_url: &str,
        static_tools: Vec<String>,
        timeouts: ProbeTimeouts,
    ) -> GatewayResult<Self> {
        Ok(Self {
            name: name.to_string(),
            probe: ProbeClient::new(base_url, timeouts)?,
            static_tools,
            health: RwLock::new(HealthCell {
                state: HealthState::Unknown,
                last_probed: None,
            }),
        })
    }

    /// Create an adapter from a config entry
    pub fn from_config(cfg: &BackendConfig) -> GatewayResult<Self> {
        Self::new(&cfg.name, &cfg.url, cfg.effective_static_tools(), cfg.timeouts)
    }

    /// The shared probing client, for adapters that wrap this one
    pub(crate) fn probe(&self) -> &ProbeClient {
        &self.probe
    }
}

#[async_trait]
impl ToolBackend for HttpToolBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &Url {
        self.probe.base_url()
    }

    fn health(&self) -> HealthState {
        self.health.read().state
    }

    fn status(&self) -> BackendStatus {
        let cell = *self.health.read();
        BackendStatus {
            name: self.name.clone(),
            url: self.probe.base_url().to_string(),
            health: cell.state,
            last_probed: cell.last_probed,
        }
    }

    async fn check_health(&self) -> HealthState {
        let state = if self.probe.probe_health().await {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        };

        let mut cell = self.health.write();
        cell.state = state;
        cell.last_probed = Some(Utc::now());

        state
    }

    async fn discover(&self) -> Discovery {
        if !self.health().allows_discovery() {
            debug!(backend = %self.name, "Skipping discovery, backend is unhealthy");
            return Discovery::empty();
        }

        if let Some(tools) = self.probe.probe_tool_lists().await {
            info!(backend = %self.name, count = tools.len(), ?tools, "Discovered tools");
            return Discovery {
                tools,
                source: DiscoverySource::Probed,
            };
        }

        if !self.static_tools.is_empty() {
            info!(
                backend = %self.name,
                tools = ?self.static_tools,
                "No discovery endpoint answered, using static tool list"
            );
            return Discovery {
                tools: self.static_tools.clone(),
                source: DiscoverySource::StaticFallback,
            };
        }

        warn!(backend = %self.name, "No tools discovered");
        Discovery::empty()
    }

    async fn invoke(
        &self,
        tool: &str,
        params: &serde_json::Value,
    ) -> GatewayResult<serde_json::Value> {
        self.probe.post_candidates(&self.name, tool, params).await
    }
}
