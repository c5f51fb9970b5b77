//! toolgate-http - HTTP backend adapters
//!
//! Backends do not share one endpoint convention, so the gateway talks to
//! them through adapters. [`HttpToolBackend`] is the generic adapter: it
//! probes an ordered list of "list tools" paths for discovery and an
//! ordered list of invocation URL shapes for dispatch. [`TimeToolBackend`]
//! layers the time-lookup backend's GET-based calling convention on top.

pub mod client;
pub mod config;
pub mod generic;
pub mod time;

pub use client::ProbeClient;
pub use config::{BackendConfig, BackendKind, ProbeTimeouts};
pub use generic::HttpToolBackend;
pub use time::TimeToolBackend;

use std::sync::Arc;

use toolgate_core::{GatewayResult, ToolBackend};

/// Build the right adapter for a backend config
pub fn backend_from_config(cfg: &BackendConfig) -> GatewayResult<Arc<dyn ToolBackend>> {
    Ok(match cfg.kind {
        BackendKind::Generic => Arc::new(HttpToolBackend::from_config(cfg)?),
        BackendKind::Time => Arc::new(TimeToolBackend::from_config(cfg)?),
    })
}
