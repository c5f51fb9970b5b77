//! toolgated - Toolgate Daemon
//!
//! MCP tool gateway with dynamic backend discovery and routing.
//!
//! Usage:
//!   toolgated [OPTIONS] [config.toml]
//!
//! Options:
//!   --no-initial-refresh  Skip the discovery pass at startup; the first
//!                         tool-list request triggers it instead
//!
//! If no config file is provided, the well-known default catalog is used
//! (time-client and code-executor on their conventional addresses).

use std::net::SocketAddr;

use toolgate_api::{create_router, AppState};
use toolgate_core::BackendCatalog;
use toolgate_http::{backend_from_config, BackendConfig, BackendKind, ProbeTimeouts};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8000;

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Skip the startup discovery pass
    no_initial_refresh: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        no_initial_refresh: false,
    };

    for arg in &args {
        match arg.as_str() {
            "--no-initial-refresh" => {
                result.no_initial_refresh = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
            }
            _ => {
                tracing::warn!("Unknown argument: {}", arg);
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"toolgated - Toolgate Daemon

Usage: toolgated [OPTIONS] [config.toml]

Options:
      --no-initial-refresh  Skip the discovery pass at startup
  -h, --help                Print this help message

Examples:
  # Run with the default backend catalog
  toolgated

  # Run with a config file
  toolgated config.toml
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "toolgated=info,toolgate_api=info,toolgate_gateway=info,toolgate_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting toolgated (MCP tool gateway)");

    let args = parse_args();

    let (configs, port) = if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path);
        load_config_file(path)?
    } else {
        tracing::info!("No config file provided, using default backend catalog");
        (default_backend_configs(), DEFAULT_PORT)
    };

    let mut catalog = BackendCatalog::new();
    for cfg in &configs {
        let backend = backend_from_config(cfg)
            .map_err(|e| anyhow::anyhow!("Failed to create backend '{}': {}", cfg.name, e))?;
        catalog.register(backend);
    }

    let state = AppState::new(catalog);

    // Populate the registry before accepting traffic; failures here are
    // non-fatal (the registry just starts empty and refreshes on demand)
    if !args.no_initial_refresh {
        state.registry().refresh().await;
        tracing::info!(tools = ?state.registry().list(), "Initial discovery complete");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The catalog used when no config file is given
fn default_backend_configs() -> Vec<BackendConfig> {
    vec![
        BackendConfig {
            name: "time-client".to_string(),
            url: "http://time-client:8003".to_string(),
            kind: BackendKind::Time,
            static_tools: Vec::new(),
            timeouts: ProbeTimeouts::default(),
        },
        BackendConfig {
            name: "code-executor".to_string(),
            url: "http://code-executor:8002".to_string(),
            kind: BackendKind::Generic,
            static_tools: Vec::new(),
            timeouts: ProbeTimeouts::default(),
        },
    ]
}

/// Load configuration from TOML file
fn load_config_file(path: &str) -> anyhow::Result<(Vec<BackendConfig>, u16)> {
    let content = std::fs::read_to_string(path)?;
    let config: toml::Value = toml::from_str(&content)?;

    let port = config
        .get("server")
        .and_then(|s| s.get("port"))
        .and_then(|p| p.as_integer())
        .unwrap_or(DEFAULT_PORT as i64) as u16;

    let mut configs = Vec::new();

    if let Some(backends) = config.get("backend").and_then(|b| b.as_table()) {
        tracing::info!(backend_count = backends.len(), "Loading backend configs");
        for (name, backend_config) in backends {
            configs.push(parse_backend_config(name, backend_config)?);
        }
    }

    if configs.is_empty() {
        anyhow::bail!("Config file '{}' defines no [backend.*] tables", path);
    }

    Ok((configs, port))
}

/// Parse one `[backend.<name>]` table
fn parse_backend_config(name: &str, config: &toml::Value) -> anyhow::Result<BackendConfig> {
    let url = config
        .get("url")
        .and_then(|u| u.as_str())
        .ok_or_else(|| anyhow::anyhow!("Backend '{}' missing 'url' field", name))?
        .to_string();

    let kind = match config.get("kind").and_then(|k| k.as_str()) {
        Some("time") => BackendKind::Time,
        Some("generic") | None => BackendKind::Generic,
        Some(other) => anyhow::bail!("Backend '{}' has unknown kind '{}'", name, other),
    };

    let static_tools = config
        .get("static_tools")
        .and_then(|t| t.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut timeouts = ProbeTimeouts::default();
    if let Some(t) = config.get("timeouts") {
        if let Some(v) = t.get("health_secs").and_then(|v| v.as_integer()) {
            timeouts.health_secs = v as u64;
        }
        if let Some(v) = t.get("discovery_secs").and_then(|v| v.as_integer()) {
            timeouts.discovery_secs = v as u64;
        }
        if let Some(v) = t.get("invoke_secs").and_then(|v| v.as_integer()) {
            timeouts.invoke_secs = v as u64;
        }
    }

    tracing::info!(backend = %name, url = %url, ?kind, "Configured backend");

    Ok(BackendConfig {
        name: name.to_string(),
        url,
        kind,
        static_tools,
        timeouts,
    })
}
