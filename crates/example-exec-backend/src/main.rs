//! Example code-execution backend
//!
//! Runs Python snippets under a wall-clock limit and vets package install
//! requests. Advertises its tools on `GET /tools`, which is the first
//! discovery path the gateway probes, and takes invocations on
//! `POST /execute-code`.
//!
//! # Usage
//!
//! ```bash
//! ./example-exec-backend --port 8002
//! ```

mod packages;
mod sandbox;

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::sandbox::SandboxError;

#[derive(Parser, Debug)]
#[command(name = "example-exec-backend")]
#[command(about = "Example code-execution backend for toolgate development")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8002)]
    port: u16,
}

#[derive(Debug, Deserialize)]
struct CodeRequest {
    code: String,
}

#[derive(Debug, Deserialize)]
struct InstallRequest {
    package: String,
    #[serde(default)]
    version: Option<String>,
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn list_tools() -> Json<Value> {
    Json(json!(["execute_python"]))
}

async fn execute_code(
    Json(request): Json<CodeRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match sandbox::run_python(&request.code).await {
        Ok(result) => Ok(Json(json!({
            "success": result.success,
            "output": result.output,
            "error": result.error,
        }))),
        Err(SandboxError::TimedOut) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "timeout", "message": "Execution timed out"})),
        )),
        Err(SandboxError::Internal(err)) => {
            warn!(error = %err, "Sandbox failure");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal", "message": err.to_string()})),
            ))
        }
    }
}

async fn pip_install(
    Json(request): Json<InstallRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match packages::vet(&request.package) {
        Ok(()) => {
            info!(package = %request.package, version = ?request.version, "Install accepted");
            Ok(Json(json!({
                "success": true,
                "package": request.package,
                "version": request.version,
            })))
        }
        Err(rejection) => {
            warn!(package = %request.package, ?rejection, "Install refused");
            Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "rejected",
                    "message": rejection.detail(&request.package),
                })),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "example_exec_backend=info".into()),
        )
        .init();

    let args = Args::parse();

    let app = Router::new()
        .route("/tools", get(list_tools))
        .route("/execute-code", post(execute_code))
        .route("/pip/install", post(pip_install))
        .route("/health", get(health_check));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Exec backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
