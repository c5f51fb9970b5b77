//! toolgate-api - HTTP API layer for the gateway
//!
//! This crate provides the gateway's inbound HTTP surface over the
//! registry/router stack. It is adapter-agnostic: anything in the catalog
//! that implements `ToolBackend` is routable.
//!
//! # Usage
//!
//! ```ignore
//! use toolgate_api::{create_router, AppState};
//!
//! let state = AppState::new(catalog);
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Tool discovery and invocation
        .route("/mcp/tools", get(handlers::tools::list_tools))
        .route("/mcp/tools/{tool}", post(handlers::tools::execute_tool))
        // Backend diagnostics
        .route("/mcp/backends", get(handlers::backends::list_backends))
        // Gateway liveness/readiness probes
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Metrics exposition
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
