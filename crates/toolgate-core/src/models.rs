//! Data model for discovery and routing

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness state of a backend as seen by the health prober.
///
/// A backend starts `Unknown` and transitions to `Healthy` or `Unhealthy`
/// on each refresh cycle. It never transitions back to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Never probed
    Unknown,
    /// Last probe returned a success status
    Healthy,
    /// Last probe failed, timed out, or returned a non-success status
    Unhealthy,
}

impl HealthState {
    /// Whether discovery should be attempted for a backend in this state
    pub fn allows_discovery(self) -> bool {
        !matches!(self, HealthState::Unhealthy)
    }
}

/// Snapshot of a backend's identity and last-known health
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    /// Backend identifier from the catalog
    pub name: String,
    /// Base address
    pub url: String,
    /// Last-known health
    pub health: HealthState,
    /// When the health prober last ran against this backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_probed: Option<DateTime<Utc>>,
}

/// How a backend's tool list was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySource {
    /// A "list tools" endpoint answered
    Probed,
    /// All probes missed; the catalog's static list was used
    StaticFallback,
}

/// Outcome of one discovery pass against a single backend
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Tool names, deduplicated (order not significant)
    pub tools: Vec<String>,
    /// Where the list came from
    pub source: DiscoverySource,
}

impl Discovery {
    /// An empty probed result (unhealthy or unrecognized backend)
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            source: DiscoverySource::Probed,
        }
    }
}

/// Registry entry mapping a tool name to its owning backend
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool name (unique key in the registry)
    pub name: String,
    /// Backend that owns this tool
    pub backend: String,
    /// How the tool was discovered
    pub source: DiscoverySource,
}

/// Result of a single tool invocation
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Whether the invocation succeeded
    pub success: bool,
    /// Backend response payload, opaque to the gateway
    pub output: serde_json::Value,
    /// Error message, if any
    pub error: Option<String>,
    /// Wall-clock time of the network call
    pub elapsed: Duration,
}
