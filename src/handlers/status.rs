//! `/status/{code}`: answer with a caller-chosen status code.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::inspect::{parse_leading_int, InboundRequest, RequestSnapshot};

#[derive(Debug, Serialize)]
pub struct StatusEcho {
    pub status: u16,
    pub message: String,
    pub request: RequestSnapshot,
}

#[derive(Debug, Serialize)]
pub struct InvalidStatus {
    pub error: &'static str,
    pub message: &'static str,
}

/// Status code requested by a path segment, if it is in `100..600`.
pub fn requested_status(raw: &str) -> Option<StatusCode> {
    parse_leading_int(raw)
        .filter(|code| (100..600).contains(code))
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
}

pub async fn respond_with_status(Path(code): Path<String>, request: InboundRequest) -> Response {
    match requested_status(&code) {
        Some(status) => {
            let code = status.as_u16();
            let body = StatusEcho {
                status: code,
                message: format!("HTTP {code}"),
                request: RequestSnapshot::format(&request),
            };
            (status, Json(body)).into_response()
        }
        None => {
            tracing::debug!(code = %code, "Rejected status code");
            let body = InvalidStatus {
                error: "Invalid status code",
                message: "Status code must be between 100 and 599",
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_status_range() {
        assert_eq!(requested_status("100"), Some(StatusCode::CONTINUE));
        assert_eq!(requested_status("418"), Some(StatusCode::IM_A_TEAPOT));
        assert_eq!(requested_status("599").map(|s| s.as_u16()), Some(599));
        assert_eq!(requested_status("99"), None);
        assert_eq!(requested_status("600"), None);
        assert_eq!(requested_status("-200"), None);
        assert_eq!(requested_status("teapot"), None);
    }

    #[test]
    fn test_requested_status_leading_digits() {
        assert_eq!(requested_status("201created"), Some(StatusCode::CREATED));
    }
}
