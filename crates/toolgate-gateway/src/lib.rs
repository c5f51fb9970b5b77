//! toolgate-gateway - Discovery, registry, and routing
//!
//! The gateway's stateful core: [`ToolRegistry`] probes the backend catalog
//! and maintains the tool-name -> backend mapping, [`ToolRouter`] resolves
//! and dispatches invocations, and [`MetricsRecorder`] counts them.

pub mod metrics;
pub mod registry;
pub mod router;

pub use metrics::{MetricsRecorder, Outcome};
pub use registry::ToolRegistry;
pub use router::ToolRouter;
