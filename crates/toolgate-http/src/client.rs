//! Shared probing client for backend HTTP calls
//!
//! All outbound traffic goes through here: the health probe, the ordered
//! discovery candidates, and the ordered invocation candidates. Each call
//! carries its own bounded timeout; failures are represented as results,
//! never panics, so a misbehaving backend cannot take the gateway down.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use toolgate_core::{GatewayError, GatewayResult};

use crate::config::ProbeTimeouts;

/// Candidate "list tools" paths, in priority order
const DISCOVERY_PATHS: &[&str] = &["tools", "mcp/tools", "api/tools"];

/// Response shape for discovery endpoints that wrap the list in an object
#[derive(Deserialize)]
struct ToolsEnvelope {
    tools: Vec<String>,
}

/// Low-level HTTP client bound to one backend's base address
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    base_url: Url,
    timeouts: ProbeTimeouts,
}

impl ProbeClient {
    /// Create a client for the given base address
    pub fn new(base_url: &str, timeouts: ProbeTimeouts) -> GatewayResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::Internal(format!("Invalid backend URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            timeouts,
        })
    }

    /// The backend's base address
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an absolute endpoint URL for a relative path.
    ///
    /// Plain concatenation rather than `Url::join` so that a base address
    /// with a path prefix keeps that prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Probe `GET <base>/health`. Exactly one success status means healthy.
    pub async fn probe_health(&self) -> bool {
        let url = self.endpoint("health");
        match self
            .client
            .get(&url)
            .timeout(self.timeouts.health())
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(url = %url, error = %e, "Health probe failed");
                false
            }
        }
    }

    /// Try the ordered discovery candidates; first success wins.
    ///
    /// Accepts either a bare JSON array of names or `{"tools": [...]}`.
    /// Returns `None` when every candidate misses.
    pub async fn probe_tool_lists(&self) -> Option<Vec<String>> {
        for path in DISCOVERY_PATHS {
            let url = self.endpoint(path);
            let resp = match self
                .client
                .get(&url)
                .timeout(self.timeouts.discovery())
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    debug!(url = %url, error = %e, "Discovery probe failed");
                    continue;
                }
            };

            if !resp.status().is_success() {
                debug!(url = %url, status = %resp.status(), "Discovery probe miss");
                continue;
            }

            let body: serde_json::Value = match resp.json().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(url = %url, error = %e, "Discovery response was not JSON");
                    continue;
                }
            };

            if let Some(tools) = parse_tool_list(&body) {
                return Some(dedupe(tools));
            }
            debug!(url = %url, "Discovery response had an unrecognized shape");
        }

        None
    }

    /// Try the ordered invocation candidates for a tool; first success wins.
    ///
    /// A 404 means "this backend doesn't expose this shape; try the next
    /// candidate". Any other non-success response is logged and treated
    /// the same as a miss. Exhaustion returns `EndpointExhausted` carrying
    /// every attempted URL.
    pub async fn post_candidates(
        &self,
        backend: &str,
        tool: &str,
        params: &serde_json::Value,
    ) -> GatewayResult<serde_json::Value> {
        let candidates = [
            self.endpoint(&format!("mcp/tools/{}", tool)),
            self.endpoint(&format!("tools/{}", tool)),
            self.endpoint(tool),
            self.endpoint("execute"),
        ];

        for url in &candidates {
            match self
                .client
                .post(url)
                .json(params)
                .timeout(self.timeouts.invoke())
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    let body = resp.json().await.map_err(|e| {
                        GatewayError::Transport(format!(
                            "Backend '{}' returned non-JSON success from {}: {}",
                            backend, url, e
                        ))
                    })?;
                    debug!(tool = %tool, url = %url, "Tool invocation succeeded");
                    return Ok(body);
                }
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                    debug!(tool = %tool, url = %url, "Endpoint shape not exposed, trying next");
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    warn!(tool = %tool, url = %url, %status, body = %body, "Tool invocation failed, trying next candidate");
                }
                Err(e) => {
                    debug!(tool = %tool, url = %url, error = %e, "Tool invocation transport error, trying next candidate");
                }
            }
        }

        Err(GatewayError::EndpointExhausted {
            tool: tool.to_string(),
            backend: backend.to_string(),
            attempted: candidates.to_vec(),
        })
    }

    /// `GET` a path and return the raw response body on success.
    ///
    /// Used by special calling conventions whose response is not a JSON
    /// object (e.g. the time backend's bare JSON string).
    pub async fn get_text(&self, path: &str) -> GatewayResult<String> {
        let url = self.endpoint(path);
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeouts.invoke())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "GET {} returned {}: {}",
                url, status, body
            )));
        }

        resp.text()
            .await
            .map_err(|e| GatewayError::Transport(format!("GET {} body read failed: {}", url, e)))
    }
}

/// Parse a discovery response body into a tool list, if it has a known shape
fn parse_tool_list(body: &serde_json::Value) -> Option<Vec<String>> {
    if let Some(arr) = body.as_array() {
        let tools: Vec<String> = arr
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        // A list of non-strings is not a tool list
        if tools.len() == arr.len() {
            return Some(tools);
        }
        return None;
    }

    serde_json::from_value::<ToolsEnvelope>(body.clone())
        .ok()
        .map(|e| e.tools)
}

/// Remove duplicates while preserving first-seen order
fn dedupe(tools: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tools.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let body = json!(["get_current_time", "execute_python"]);
        assert_eq!(
            parse_tool_list(&body),
            Some(vec![
                "get_current_time".to_string(),
                "execute_python".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_tools_envelope() {
        let body = json!({"tools": ["execute_python"]});
        assert_eq!(parse_tool_list(&body), Some(vec!["execute_python".to_string()]));
    }

    #[test]
    fn test_rejects_non_string_array() {
        let body = json!([1, 2, 3]);
        assert_eq!(parse_tool_list(&body), None);
    }

    #[test]
    fn test_rejects_unrelated_object() {
        let body = json!({"status": "healthy"});
        assert_eq!(parse_tool_list(&body), None);
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let tools = vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedupe(tools), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let probe = ProbeClient::new("http://t:8003/", ProbeTimeouts::default()).unwrap();
        assert_eq!(probe.endpoint("health"), "http://t:8003/health");
        assert_eq!(probe.endpoint("/tools"), "http://t:8003/tools");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let probe = ProbeClient::new("http://t:8003/api/v1", ProbeTimeouts::default()).unwrap();
        assert_eq!(probe.endpoint("health"), "http://t:8003/api/v1/health");
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        assert!(ProbeClient::new("not a url", ProbeTimeouts::default()).is_err());
    }
}
