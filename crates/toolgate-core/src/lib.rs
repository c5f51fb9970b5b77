//! toolgate-core - Core traits and types for the Toolgate MCP gateway
//!
//! This crate provides the fundamental abstractions that allow different
//! backend adapters (generic HTTP, time-convention, etc.) to plug into the
//! gateway's discovery and routing machinery.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod models;
pub mod testing;

pub use backend::ToolBackend;
pub use catalog::BackendCatalog;
pub use error::{GatewayError, GatewayResult};
pub use models::{
    BackendStatus, Discovery, DiscoverySource, ExecutionOutcome, HealthState, ToolDescriptor,
};
