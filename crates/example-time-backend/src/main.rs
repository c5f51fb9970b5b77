//! Example time-lookup backend
//!
//! Serves the time backend's calling convention for toolgate development:
//! `GET /current-time` returns the current UTC time as a bare JSON string.
//! Deliberately exposes no `/tools` endpoint, so the gateway has to fall
//! back to its static tool list for this backend.
//!
//! # Usage
//!
//! ```bash
//! ./example-time-backend --port 8003
//! ```

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "example-time-backend")]
#[command(about = "Example time-lookup backend for toolgate development")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8003)]
    port: u16,
}

/// Current UTC time in ISO format with a trailing marker
fn current_time_string() -> String {
    format!("{} UTC", Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false))
}

async fn current_time() -> Json<String> {
    let now = current_time_string();
    info!(time = %now, "Serving current time");
    Json(now)
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "example_time_backend=info".into()),
        )
        .init();

    let args = Args::parse();

    let app = Router::new()
        .route("/current-time", get(current_time))
        .route("/health", get(health_check));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Time backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
