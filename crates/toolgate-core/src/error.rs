//! Common error types for the gateway

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while discovering or invoking tools
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Backend failed its liveness probe; discovery was skipped
    #[error("Backend unhealthy: {0}")]
    BackendUnhealthy(String),

    /// All discovery candidates for a backend were exhausted
    #[error("Discovery failed for backend '{backend}': {message}")]
    Discovery {
        /// Backend that failed discovery
        backend: String,
        /// What went wrong
        message: String,
    },

    /// Tool is not in the registry, even after a refresh attempt
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// Every candidate invocation endpoint was tried without success
    #[error("No working endpoint for tool '{tool}' on backend '{backend}'")]
    EndpointExhausted {
        /// Tool being invoked
        tool: String,
        /// Backend that owns the tool
        backend: String,
        /// Every endpoint that was attempted, in order
        attempted: Vec<String>,
    },

    /// Execution backend reported a timeout
    #[error("Tool execution timed out")]
    ExecutionTimeout,

    /// Execution backend reported a failure
    #[error("Tool execution failed: {0}")]
    Execution(String),

    /// Transport/communication error talking to a backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::BackendUnhealthy(_) => 503,
            GatewayError::Discovery { .. } => 502,
            GatewayError::UnknownTool(_) => 404,
            GatewayError::EndpointExhausted { .. } => 500,
            GatewayError::ExecutionTimeout => 504,
            GatewayError::Execution(_) => 500,
            GatewayError::Transport(_) => 503,
            GatewayError::Internal(_) => 500,
        }
    }
}
