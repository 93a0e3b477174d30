//! Error types and their HTTP mapping.
//!
//! Two kinds of failure exist. Validation errors are caused by the client and
//! never reach DocuWare. Upstream errors cover everything after validation:
//! building the multipart request, the network call and non-2xx answers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::upload::types::UploadResult;

/// Fixed error code reported for every failed upload.
pub const UPLOAD_FAILURE_CODE: &str = "DOC_UPLOAD_FAIL";

/// Message returned alongside [`UPLOAD_FAILURE_CODE`].
pub const UPLOAD_FAILURE_MESSAGE: &str = "Failed to create record in DocuWare";

/// Errors raised while talking to DocuWare.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DocuWare answered with a non-success status.
    #[error("DocuWare responded with status {status}")]
    Status { status: u16, body: String },

    /// Connection failure, timeout or unreadable response.
    #[error("DocuWare request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The documents URL could not be built from the base URL and cabinet id.
    #[error("Invalid DocuWare URL: {0}")]
    InvalidUrl(String),

    /// The multipart body could not be assembled.
    #[error("Failed to build multipart body: {0}")]
    Multipart(String),
}

impl UpstreamError {
    /// The value forwarded to the caller as `error.details`.
    ///
    /// The upstream body is relayed as JSON when it parses, as text otherwise.
    /// Local failures fall back to their message.
    pub fn details(&self) -> Value {
        match self {
            UpstreamError::Status { body, .. } if !body.trim().is_empty() => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            UpstreamError::Transport(e) if e.is_timeout() => {
                Value::String(format!("DocuWare did not respond in time: {}", e))
            }
            other => Value::String(other.to_string()),
        }
    }

    /// Upstream HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Request-level error returned by the upload handler.
#[derive(Debug, Error)]
pub enum ForwarderError {
    /// Missing or malformed input. No upstream call was made.
    #[error("{0}")]
    Validation(String),

    /// Body exceeded the configured limit.
    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    /// DocuWare could not store the record.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ForwarderError {
    pub fn validation(message: impl Into<String>) -> Self {
        ForwarderError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwarderError::Validation(_) => StatusCode::BAD_REQUEST,
            ForwarderError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ForwarderError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the caller.
    pub fn to_result(&self) -> UploadResult {
        match self {
            ForwarderError::Validation(_) | ForwarderError::PayloadTooLarge { .. } => {
                UploadResult::rejected(self.to_string())
            }
            ForwarderError::Upstream(e) => {
                UploadResult::failed(UPLOAD_FAILURE_MESSAGE, UPLOAD_FAILURE_CODE, e.details())
            }
        }
    }
}

impl IntoResponse for ForwarderError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_result())).into_response()
    }
}
