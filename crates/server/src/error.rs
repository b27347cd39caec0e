//! Errors returned by the plain HTTP routes.
//!
//! MCP tool errors go through `From<toolbench_core::Error> for ErrorData`;
//! this type covers the JSON endpoints mounted next to the MCP service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error body for HTTP routes: `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was understood but carries nothing to act on.
    #[error("{0}")]
    BadRequest(String),

    /// Malformed request or failure while handling it.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
