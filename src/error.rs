//! Proxy error taxonomy and its JSON envelopes.
//!
//! Every variant renders to a JSON body, so a browser can always read why a
//! request failed. CORS headers are added by
//! [`crate::api::middleware::cors`] on the way out.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Body text for requests that cannot be decoded.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request";

/// Message used when an internal failure carries no text of its own.
const GENERIC_FAILURE_MESSAGE: &str = "Request processing failed";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body is not JSON or lacks a usable `query` field.
    #[error("Invalid JSON in request: {details}")]
    MalformedRequest { details: String },

    /// Upstream answered with a non-2xx status.
    #[error("API request failed ({status}): {body}")]
    UpstreamUnavailable { status: u16, body: String },

    /// Anything else: transport failures, undecodable upstream bodies.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedRequest {
            details: details.into(),
        }
    }
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            status,
            body: body.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::MalformedRequest { .. } => json!({ "error": INVALID_JSON_MESSAGE }),
            AppError::UpstreamUnavailable { .. } => {
                json!({ "errors": [{ "message": self.to_string() }] })
            }
            AppError::Internal { message } => {
                let message = if message.is_empty() {
                    GENERIC_FAILURE_MESSAGE
                } else {
                    message.as_str()
                };
                json!({ "errors": [{ "message": message }] })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a reqwest failure talking to upstream into an internal error.
pub fn map_reqwest_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        return AppError::internal(format!("Upstream request timed out: {e}"));
    }

    AppError::internal(e.to_string())
}
