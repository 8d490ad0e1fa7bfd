//! Full-snapshot echo handlers.

use axum::Json;

use crate::inspect::{AnnotatedSnapshot, InboundRequest, RequestSnapshot};

/// Note attached to snapshots served by the catch-all route.
pub const CATCH_ALL_NOTE: &str =
    "This endpoint accepts any HTTP method and path for debugging purposes";

/// Echo the request as a snapshot.
pub async fn snapshot(request: InboundRequest) -> Json<RequestSnapshot> {
    Json(RequestSnapshot::format(&request))
}

/// Echo any unmatched request, annotated.
pub async fn catch_all(request: InboundRequest) -> Json<AnnotatedSnapshot> {
    tracing::debug!(method = %request.method, path = %request.uri.path(), "Unmatched route");
    Json(AnnotatedSnapshot {
        snapshot: RequestSnapshot::format(&request),
        note: CATCH_ALL_NOTE,
    })
}
