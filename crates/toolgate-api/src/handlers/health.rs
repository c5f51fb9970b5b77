//! Gateway liveness and readiness handlers
//!
//! These report the gateway's own health, independent of backend health.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub last_check: DateTime<Utc>,
}

/// GET /health
pub async fn health_check() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "healthy",
        last_check: Utc::now(),
    })
}

/// GET /ready
pub async fn readiness_check() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "ready",
        last_check: Utc::now(),
    })
}
