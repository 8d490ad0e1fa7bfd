//! Narrowed views of the request: headers, client IP, user agent, JSON body.

use axum::{http::header::USER_AGENT, Json};
use serde::Serialize;
use serde_json::Value;

use crate::inspect::fields::header_str;
use crate::inspect::{render_headers, resolve_client_ip, FieldMap, InboundRequest};

#[derive(Debug, Serialize)]
pub struct HeadersView {
    pub headers: FieldMap,
}

#[derive(Debug, Serialize)]
pub struct OriginView {
    pub origin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserAgentView {
    #[serde(rename = "user-agent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonEcho {
    pub json: Value,
    pub headers: FieldMap,
    pub method: String,
}

// Every view extracts `InboundRequest` so the body is decoded on every route.

pub async fn headers(request: InboundRequest) -> Json<HeadersView> {
    Json(HeadersView {
        headers: render_headers(&request.headers),
    })
}

pub async fn ip(request: InboundRequest) -> Json<OriginView> {
    Json(OriginView {
        origin: resolve_client_ip(&request.headers, request.peer_addr),
    })
}

pub async fn user_agent(request: InboundRequest) -> Json<UserAgentView> {
    Json(UserAgentView {
        user_agent: header_str(&request.headers, USER_AGENT),
    })
}

/// Echo the decoded body; an absent body echoes as `{}`.
pub async fn json(request: InboundRequest) -> Json<JsonEcho> {
    Json(JsonEcho {
        json: request
            .body
            .unwrap_or_else(|| Value::Object(Default::default())),
        headers: render_headers(&request.headers),
        method: request.method.as_str().to_owned(),
    })
}
