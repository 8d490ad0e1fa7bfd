//! `/delay/{seconds}`: answer after a timer fires.

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::inspect::{parse_leading_int, InboundRequest, RequestSnapshot};

/// Longest accepted delay in seconds.
pub const MAX_DELAY_SECS: i64 = 10;

#[derive(Debug, Serialize)]
pub struct DelayedResponse {
    pub delay: i64,
    pub message: String,
    pub request: RequestSnapshot,
}

#[derive(Debug, Serialize)]
pub struct DelayRejected {
    pub error: String,
}

/// Requested delay; unparseable input is 0.
pub fn requested_delay(raw: &str) -> i64 {
    parse_leading_int(raw).unwrap_or(0)
}

/// Time to wait for `delay`. Negative delays wait zero.
pub fn wait_for(delay: i64) -> Duration {
    Duration::from_secs(u64::try_from(delay).unwrap_or(0))
}

pub async fn respond_after_delay(Path(seconds): Path<String>, request: InboundRequest) -> Response {
    let delay = requested_delay(&seconds);
    if delay > MAX_DELAY_SECS {
        let body = DelayRejected {
            error: format!("Delay too long. Maximum delay is {MAX_DELAY_SECS} seconds"),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    tracing::debug!(delay, "Delaying response");
    tokio::time::sleep(wait_for(delay)).await;

    Json(DelayedResponse {
        delay,
        message: format!("Delayed response by {delay} seconds"),
        request: RequestSnapshot::format(&request),
    })
    .into_response()
}
