//! ToolBackend trait - the adapter seam between the gateway and its backends
//!
//! Each backend type implements a fixed discovery/invocation strategy. The
//! generic HTTP adapter probes multiple URL shapes; special-convention
//! adapters (e.g. the time-lookup backend) override invocation for the
//! tools they know about. The registry and router only see this trait.

use async_trait::async_trait;
use url::Url;

use crate::error::GatewayResult;
use crate::models::{BackendStatus, Discovery, HealthState};

/// A backend service that implements zero or more tools.
///
/// Probing methods never propagate transport failures: `check_health`
/// reports failure as `Unhealthy` and `discover` degrades to a static
/// fallback or an empty set. Only `invoke` returns errors to its caller.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Backend identifier from the catalog
    fn name(&self) -> &str;

    /// Base address of the backend
    fn base_url(&self) -> &Url;

    /// Last-known health without probing
    fn health(&self) -> HealthState;

    /// Identity plus last-known health, for the diagnostic surface
    fn status(&self) -> BackendStatus;

    /// Probe the backend's health endpoint.
    ///
    /// Side effect: updates the backend's health field and last-probed
    /// timestamp. Never fails; any error is the `Unhealthy` result.
    async fn check_health(&self) -> HealthState;

    /// Ask the backend which tools it implements.
    ///
    /// Skips the network entirely when the current health is `Unhealthy`.
    async fn discover(&self) -> Discovery;

    /// Invoke a tool with a JSON parameters object.
    ///
    /// Returns the backend's raw JSON response on success.
    async fn invoke(&self, tool: &str, params: &serde_json::Value)
        -> GatewayResult<serde_json::Value>;
}
