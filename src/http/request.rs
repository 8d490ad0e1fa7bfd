//! Request identification for tracing.
//!
//! Every request runs inside a span carrying a request ID: the caller's
//! `x-request-id` when supplied, a fresh UUID v4 otherwise. The ID lives
//! only in the span; the request headers are not modified, so echoed
//! headers are exactly what the client sent.

use axum::extract::Request;
use tracing::Span;
use uuid::Uuid;

/// Header carrying a caller-supplied request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID for `request`.
pub fn request_id(request: &Request) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request),
        method = %request.method(),
        uri = %request.uri(),
    )
}
