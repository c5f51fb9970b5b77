//! Tool listing and invocation handlers

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /mcp/tools
/// List all available tool names.
///
/// Triggers a full discovery pass when the registry is empty (first
/// request after startup, or after every backend failed discovery).
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<String>> {
    if state.registry().is_empty() {
        state.registry().refresh().await;
    }
    Json(state.registry().list())
}

/// POST /mcp/tools/:tool
/// Invoke a tool with an optional JSON object body of parameters.
///
/// Returns the backend's raw JSON response on success. An unknown tool
/// (after one registry refresh) is a 404; exhausted candidate endpoints
/// are a 500 carrying the attempted-path list.
pub async fn execute_tool(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let params = body.map(|Json(v)| v).unwrap_or_else(|| Value::Object(Default::default()));

    let outcome = state.router().invoke(&tool, &params).await?;
    Ok(Json(outcome.output))
}
