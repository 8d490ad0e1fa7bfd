//! The request snapshot and the formatter that builds it.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, ORIGIN, REFERER, USER_AGENT};
use axum::http::{HeaderMap, Method, Uri};
use serde::Serialize;
use serde_json::Value;

use crate::inspect::body::is_trivially_empty;
use crate::inspect::client_ip::resolve_client_ip;
use crate::inspect::fields::{header_str, parse_cookies, parse_query, render_headers, FieldMap};
use crate::inspect::iso_timestamp;

/// Everything the formatter needs from one inbound request.
///
/// Built by the `InboundRequest` extractor after the body has been buffered
/// and decoded; immutable afterwards.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub peer_addr: Option<SocketAddr>,
    pub params: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl InboundRequest {
    /// Minimal request for the given method and URI, no headers or body.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            peer_addr: None,
            params: BTreeMap::new(),
            body: None,
        }
    }
}

/// Structured description of one inbound request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub timestamp: String,
    pub method: String,
    pub url: String,
    pub path: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub ip: Option<String>,
    pub headers: FieldMap,
    pub query: FieldMap,
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    pub cookies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

impl RequestSnapshot {
    /// Format a request. The timestamp is the only input not taken from it.
    pub fn format(request: &InboundRequest) -> Self {
        let headers = &request.headers;
        let path = request.uri.path().to_owned();
        let url = request
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| path.clone());

        Self {
            timestamp: iso_timestamp(),
            method: request.method.as_str().to_owned(),
            url,
            path,
            protocol: request.uri.scheme_str().unwrap_or("http").to_owned(),
            hostname: hostname(headers, &request.uri),
            ip: resolve_client_ip(headers, request.peer_addr),
            headers: render_headers(headers),
            query: parse_query(request.uri.query()),
            params: request.params.clone(),
            body: request.body.clone().filter(|body| !is_trivially_empty(body)),
            cookies: parse_cookies(headers),
            user_agent: header_str(headers, USER_AGENT),
            content_type: header_str(headers, CONTENT_TYPE),
            content_length: header_str(headers, CONTENT_LENGTH),
            host: header_str(headers, HOST),
            origin: header_str(headers, ORIGIN),
            referer: header_str(headers, REFERER),
        }
    }
}

/// Snapshot with an explanatory note, served by the fallback route.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedSnapshot {
    #[serde(flatten)]
    pub snapshot: RequestSnapshot,
    pub note: &'static str,
}

/// Host name without port; IPv6 literals keep their brackets.
fn hostname(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = header_str(headers, HOST).or_else(|| {
        uri.authority().map(|authority| authority.as_str().to_owned())
    })?;
    let host = host.trim();
    if host.is_empty() {
        return None;
    }

    let name = if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };
    Some(name.to_owned())
}
