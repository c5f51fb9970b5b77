//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use toolgate_core::GatewayError;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound(String),
    /// 500 Internal Server Error - every candidate endpoint was tried
    EndpointExhausted {
        message: String,
        attempted: Vec<String>,
    },
    /// 502 Bad Gateway (backend protocol error)
    BadGateway(String),
    /// 503 Service Unavailable
    ServiceUnavailable(String),
    /// 504 Gateway Timeout
    GatewayTimeout(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Error response carrying the attempted endpoint list for diagnostics
#[derive(Serialize)]
struct ExhaustedResponse {
    error: String,
    message: String,
    attempted_endpoints: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Endpoint exhaustion carries the attempted paths in the body
        if let ApiError::EndpointExhausted { message, attempted } = self {
            tracing::error!(%message, ?attempted, "No working endpoint for tool");

            let body = Json(ExhaustedResponse {
                error: "endpoint_exhausted".to_string(),
                message,
                attempted_endpoints: attempted,
            });

            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }

        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::EndpointExhausted { .. } => unreachable!(), // Handled above
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::UnknownTool(tool) => {
                ApiError::NotFound(format!("Tool not found: {}", tool))
            }
            e @ GatewayError::EndpointExhausted { .. } => {
                let message = e.to_string();
                let attempted = match e {
                    GatewayError::EndpointExhausted { attempted, .. } => attempted,
                    _ => Vec::new(),
                };
                ApiError::EndpointExhausted { message, attempted }
            }
            GatewayError::ExecutionTimeout => {
                ApiError::GatewayTimeout("Tool execution timed out".to_string())
            }
            GatewayError::BackendUnhealthy(msg) => ApiError::ServiceUnavailable(msg),
            GatewayError::Transport(msg) => ApiError::ServiceUnavailable(msg),
            e @ GatewayError::Discovery { .. } => ApiError::BadGateway(e.to_string()),
            GatewayError::Execution(msg) => ApiError::Internal(msg),
            GatewayError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
