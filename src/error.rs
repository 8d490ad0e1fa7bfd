//! Failure taxonomy for request handling.
//!
//! Every failure surfaces to the client as a single `500` JSON body of the
//! shape `{error, message, timestamp}`; validation problems (bad status
//! code, excessive delay) are not errors here and are answered by their
//! handlers directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::inspect::iso_timestamp;

/// Errors raised while turning an inbound request into a snapshot.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Body exceeded the configured ceiling.
    #[error("request entity too large")]
    BodyTooLarge { limit: usize },

    /// Body stream failed (client abort, bad encoding, decompression error).
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// JSON body did not parse.
    #[error("invalid JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// JSON body parsed but the top level is a primitive.
    #[error("invalid JSON body: top level must be an object or array")]
    NonStructuredJson,

    /// `Content-Encoding` the request decompressor cannot undo.
    #[error("unsupported content encoding \"{0}\"")]
    UnsupportedEncoding(String),

    /// URL-encoded form body did not parse.
    #[error("invalid form body: {0}")]
    MalformedForm(#[from] serde_urlencoded::de::Error),
}

/// Body of every `500` response.
#[derive(Debug, Serialize)]
pub struct InternalErrorBody {
    pub error: &'static str,
    pub message: String,
    pub timestamp: String,
}

/// Build the `500` response for `message`.
pub fn internal_error_response(message: impl Into<String>) -> Response {
    let body = InternalErrorBody {
        error: "Internal Server Error",
        message: message.into(),
        timestamp: iso_timestamp(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl IntoResponse for InspectError {
    fn into_response(self) -> Response {
        match &self {
            InspectError::BodyTooLarge { limit } => {
                tracing::error!(limit, error = %self, "Rejected request body");
            }
            _ => tracing::error!(error = ?self, "Request handling failed"),
        }
        internal_error_response(self.to_string())
    }
}
