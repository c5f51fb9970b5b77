//! Backend adapter configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one backend entry in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend identifier
    pub name: String,
    /// Base address (e.g. "http://time-client:8003")
    pub url: String,
    /// Which adapter to use
    #[serde(default)]
    pub kind: BackendKind,
    /// Static tool list used when every discovery probe misses.
    /// Empty means "use the well-known default for this backend name,
    /// or no fallback at all".
    #[serde(default)]
    pub static_tools: Vec<String>,
    /// Outbound call timeouts
    #[serde(default)]
    pub timeouts: ProbeTimeouts,
}

impl BackendConfig {
    /// Resolve the effective static fallback list for this backend
    pub fn effective_static_tools(&self) -> Vec<String> {
        if self.static_tools.is_empty() {
            default_static_tools(&self.name)
        } else {
            self.static_tools.clone()
        }
    }
}

/// Adapter selection for a backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Multi-shape probing adapter for backends with no known convention
    #[default]
    Generic,
    /// Time-lookup convention (GET /current-time for get_current_time)
    Time,
}

/// Per-call timeouts for outbound probes and invocations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProbeTimeouts {
    /// Health check timeout in seconds
    #[serde(default = "default_health_secs")]
    pub health_secs: u64,
    /// Discovery probe timeout in seconds
    #[serde(default = "default_discovery_secs")]
    pub discovery_secs: u64,
    /// Tool invocation timeout in seconds
    #[serde(default = "default_invoke_secs")]
    pub invoke_secs: u64,
}

fn default_health_secs() -> u64 {
    5
}

fn default_discovery_secs() -> u64 {
    10
}

fn default_invoke_secs() -> u64 {
    30
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            health_secs: default_health_secs(),
            discovery_secs: default_discovery_secs(),
            invoke_secs: default_invoke_secs(),
        }
    }
}

impl ProbeTimeouts {
    /// Health check timeout
    pub fn health(&self) -> Duration {
        Duration::from_secs(self.health_secs)
    }

    /// Discovery probe timeout
    pub fn discovery(&self) -> Duration {
        Duration::from_secs(self.discovery_secs)
    }

    /// Invocation timeout
    pub fn invoke(&self) -> Duration {
        Duration::from_secs(self.invoke_secs)
    }
}

/// Well-known static tool lists, keyed by backend identity.
///
/// Degraded-mode behavior: these backends stay usable even when their
/// discovery endpoint is missing or mis-deployed.
pub fn default_static_tools(backend_name: &str) -> Vec<String> {
    match backend_name {
        name if name.contains("time-client") => vec!["get_current_time".to_string()],
        name if name.contains("code-executor") => vec!["execute_python".to_string()],
        _ => Vec::new(),
    }
}
