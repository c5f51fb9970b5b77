//! Backend status handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use toolgate_core::BackendStatus;

use crate::state::AppState;

#[derive(Serialize)]
pub struct BackendsResponse {
    pub items: Vec<BackendStatus>,
}

/// GET /mcp/backends
/// Per-backend identity and last-known health, for diagnosing
/// misconfigured catalogs.
pub async fn list_backends(State(state): State<AppState>) -> Json<BackendsResponse> {
    Json(BackendsResponse {
        items: state.registry().backend_statuses(),
    })
}
