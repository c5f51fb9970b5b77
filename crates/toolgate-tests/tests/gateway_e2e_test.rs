//! End-to-end tests for the tool gateway
//!
//! These tests run the full stack in-process:
//! 1. Spawn mock backends on ephemeral ports
//! 2. Wire them into a catalog through the HTTP adapters
//! 3. Serve the gateway API on an ephemeral port
//! 4. Drive it with a plain HTTP client and verify routing, discovery
//!    fallback, error bodies and metrics
//!
//! Run with: cargo test -p toolgate-tests

use std::time::Duration;

use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use toolgate_api::{create_router, AppState};
use toolgate_core::BackendCatalog;
use toolgate_http::{backend_from_config, BackendConfig, BackendKind, ProbeTimeouts};

/// Serve an axum router on an ephemeral port, returning its base URL
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn backend_config(name: &str, url: &str, kind: BackendKind, static_tools: &[&str]) -> BackendConfig {
    BackendConfig {
        name: name.to_string(),
        url: url.to_string(),
        kind,
        static_tools: static_tools.iter().map(|s| s.to_string()).collect(),
        timeouts: ProbeTimeouts::default(),
    }
}

/// Build the gateway over the given backend configs and serve it
async fn spawn_gateway(configs: &[BackendConfig]) -> (String, Client) {
    let mut catalog = BackendCatalog::new();
    for cfg in configs {
        catalog.register(backend_from_config(cfg).unwrap());
    }
    let base = spawn_server(create_router(AppState::new(catalog))).await;
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    (base, client)
}

/// Mock time backend: health and a GET time endpoint, no tool listing
fn mock_time_backend() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route(
            "/current-time",
            get(|| async { Json("2024-01-01T00:00:00+00:00 UTC".to_string()) }),
        )
}

/// Mock exec backend: advertises its tool and takes invocations on the
/// bare `/execute` shape, so dispatch has to walk past three 404s/405s
fn mock_exec_backend() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/tools", get(|| async { Json(json!(["execute_python"])) }))
        .route(
            "/execute",
            post(|Json(params): Json<Value>| async move {
                Json(json!({"success": true, "echo": params}))
            }),
        )
}

#[tokio::test]
async fn test_tools_aggregated_from_probe_and_fallback() {
    let time_url = spawn_server(mock_time_backend()).await;
    let exec_url = spawn_server(mock_exec_backend()).await;

    // The time backend has no listing endpoint, so its tool comes from
    // the static fallback; the exec backend's comes from a live probe.
    let (base, client) = spawn_gateway(&[
        backend_config("time-client", &time_url, BackendKind::Time, &[]),
        backend_config("code-executor", &exec_url, BackendKind::Generic, &[]),
    ])
    .await;

    let tools: Vec<String> = client
        .get(format!("{}/mcp/tools", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(tools, vec!["execute_python", "get_current_time"]);
}

#[tokio::test]
async fn test_time_tool_invoked_via_get_convention() {
    let time_url = spawn_server(mock_time_backend()).await;
    let (base, client) = spawn_gateway(&[backend_config(
        "time-client",
        &time_url,
        BackendKind::Time,
        &[],
    )])
    .await;

    // First invocation also exercises the refresh-on-miss path
    let response = client
        .post(format!("{}/mcp/tools/get_current_time", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["output"], json!("2024-01-01T00:00:00+00:00 UTC"));
}

#[tokio::test]
async fn test_generic_invocation_falls_through_to_execute() {
    let exec_url = spawn_server(mock_exec_backend()).await;
    let (base, client) = spawn_gateway(&[backend_config(
        "code-executor",
        &exec_url,
        BackendKind::Generic,
        &[],
    )])
    .await;

    let response = client
        .post(format!("{}/mcp/tools/execute_python", base))
        .json(&json!({"code": "print(1)"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["echo"], json!({"code": "print(1)"}));
}

#[tokio::test]
async fn test_unknown_tool_returns_structured_404() {
    let exec_url = spawn_server(mock_exec_backend()).await;
    let (base, client) = spawn_gateway(&[backend_config(
        "code-executor",
        &exec_url,
        BackendKind::Generic,
        &[],
    )])
    .await;

    let response = client
        .post(format!("{}/mcp/tools/no_such_tool", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("not_found"));
    assert!(body["message"].as_str().unwrap().contains("no_such_tool"));
}

#[tokio::test]
async fn test_unreachable_backend_yields_no_tools() {
    let (base, client) = spawn_gateway(&[backend_config(
        "flaky",
        &dead_url(),
        BackendKind::Generic,
        &[],
    )])
    .await;

    let tools: Vec<String> = client
        .get(format!("{}/mcp/tools", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(tools.is_empty());

    let backends: Value = client
        .get(format!("{}/mcp/backends", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(backends["items"][0]["name"], json!("flaky"));
    assert_eq!(backends["items"][0]["health"], json!("unhealthy"));
}

#[tokio::test]
async fn test_exhausted_endpoints_reported_with_attempts() {
    // Healthy backend that advertises a tool it cannot actually serve
    let router = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/tools", get(|| async { Json(json!(["ghost"])) }));
    let url = spawn_server(router).await;

    let (base, client) =
        spawn_gateway(&[backend_config("hollow", &url, BackendKind::Generic, &[])]).await;

    let response = client
        .post(format!("{}/mcp/tools/ghost", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], json!("endpoint_exhausted"));
    let attempted = body["attempted_endpoints"].as_array().unwrap();
    assert_eq!(attempted.len(), 4);
    assert!(attempted
        .iter()
        .any(|p| p.as_str().unwrap().ends_with("/execute")));
}

#[tokio::test]
async fn test_metrics_reflect_invocations() {
    let exec_url = spawn_server(mock_exec_backend()).await;
    let (base, client) = spawn_gateway(&[backend_config(
        "code-executor",
        &exec_url,
        BackendKind::Generic,
        &[],
    )])
    .await;

    for _ in 0..2 {
        let response = client
            .post(format!("{}/mcp/tools/execute_python", base))
            .json(&json!({"code": "pass"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let metrics = client
        .get(format!("{}/metrics", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(metrics
        .contains(r#"tool_executions_total{tool="execute_python",status="success"} 2"#));
    assert!(metrics.contains(r#"tool_execution_seconds_count{tool="execute_python"} 2"#));
}

#[tokio::test]
async fn test_duplicate_tool_goes_to_last_registered_backend() {
    fn claiming(owner: &'static str) -> Router {
        Router::new()
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
            .route("/tools", get(|| async { Json(json!(["dup"])) }))
            .route(
                "/mcp/tools/{tool}",
                post(move |Path(_tool): Path<String>, Json(_): Json<Value>| async move {
                    Json(json!({"owner": owner}))
                }),
            )
    }

    let first_url = spawn_server(claiming("first")).await;
    let second_url = spawn_server(claiming("second")).await;

    let (base, client) = spawn_gateway(&[
        backend_config("first", &first_url, BackendKind::Generic, &[]),
        backend_config("second", &second_url, BackendKind::Generic, &[]),
    ])
    .await;

    let body: Value = client
        .post(format!("{}/mcp/tools/dup", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["owner"], json!("second"));
}

#[tokio::test]
async fn test_health_and_ready_probes() {
    let (base, client) = spawn_gateway(&[backend_config(
        "flaky",
        &dead_url(),
        BackendKind::Generic,
        &[],
    )])
    .await;

    // Gateway liveness is independent of backend health
    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], json!("healthy"));

    let ready: Value = client
        .get(format!("{}/ready", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ready["status"], json!("ready"));
}
