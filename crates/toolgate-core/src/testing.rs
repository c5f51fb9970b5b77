//! Test utilities for toolgate
//!
//! Provides an in-memory [`ToolBackend`] stub so registry/router/API tests
//! can run without any network I/O.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::backend::ToolBackend;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{BackendStatus, Discovery, DiscoverySource, HealthState};

/// In-memory backend stub with programmable health, tools, and responses.
///
/// Counts every probe and invocation so tests can assert how often the
/// gateway actually touched the backend.
pub struct StubBackend {
    name: String,
    base_url: Url,
    reachable: bool,
    tools: Vec<String>,
    /// `Some` => invoke returns this value; `None` => invoke exhausts
    response: Option<serde_json::Value>,
    health: Mutex<HealthState>,
    /// Number of health probes issued
    pub health_checks: AtomicUsize,
    /// Number of discovery passes issued
    pub discoveries: AtomicUsize,
    /// Number of invocations issued
    pub invocations: AtomicUsize,
}

impl StubBackend {
    /// A reachable backend exposing the given tools
    pub fn healthy(name: &str, tools: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            base_url: Url::parse(&format!("http://{}.test", name)).expect("stub url"),
            reachable: true,
            tools: tools.iter().map(|t| t.to_string()).collect(),
            response: Some(serde_json::json!({"success": true})),
            health: Mutex::new(HealthState::Unknown),
            health_checks: AtomicUsize::new(0),
            discoveries: AtomicUsize::new(0),
            invocations: AtomicUsize::new(0),
        }
    }

    /// An unreachable backend; every health probe reports unhealthy
    pub fn unreachable(name: &str) -> Self {
        Self {
            reachable: false,
            ..Self::healthy(name, &[])
        }
    }

    /// Replace the canned invocation response
    pub fn with_response(mut self, response: serde_json::Value) -> Self {
        self.response = Some(response);
        self
    }

    /// Make every invocation exhaust its candidate endpoints
    pub fn with_exhausted_endpoints(mut self) -> Self {
        self.response = None;
        self
    }

    fn attempted_paths(&self, tool: &str) -> Vec<String> {
        let base = self.base_url.as_str().trim_end_matches('/').to_string();
        vec![
            format!("{}/mcp/tools/{}", base, tool),
            format!("{}/tools/{}", base, tool),
            format!("{}/{}", base, tool),
            format!("{}/execute", base),
        ]
    }
}

#[async_trait]
impl ToolBackend for StubBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn health(&self) -> HealthState {
        *self.health.lock().expect("health lock")
    }

    fn status(&self) -> BackendStatus {
        BackendStatus {
            name: self.name.clone(),
            url: self.base_url.to_string(),
            health: self.health(),
            last_probed: Some(Utc::now()),
        }
    }

    async fn check_health(&self) -> HealthState {
        self.health_checks.fetch_add(1, Ordering::SeqCst);
        let state = if self.reachable {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        };
        *self.health.lock().expect("health lock") = state;
        state
    }

    async fn discover(&self) -> Discovery {
        self.discoveries.fetch_add(1, Ordering::SeqCst);
        if !self.health().allows_discovery() {
            return Discovery::empty();
        }
        Discovery {
            tools: self.tools.clone(),
            source: DiscoverySource::Probed,
        }
    }

    async fn invoke(
        &self,
        tool: &str,
        _params: &serde_json::Value,
    ) -> GatewayResult<serde_json::Value> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(value) => Ok(value.clone()),
            None => Err(GatewayError::EndpointExhausted {
                tool: tool.to_string(),
                backend: self.name.clone(),
                attempted: self.attempted_paths(tool),
            }),
        }
    }
}
