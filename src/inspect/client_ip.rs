//! Client address resolution.
//!
//! Precedence, first present value wins:
//! 1. `X-Forwarded-For`, passed through raw (lists are not split or trimmed)
//! 2. The transport peer address of the connection
//! 3. Nothing
//!
//! An empty `X-Forwarded-For` counts as absent.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Forwarding header consulted before the peer address.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolve the client address for a request.
pub fn resolve_client_ip(headers: &HeaderMap, peer_addr: Option<SocketAddr>) -> Option<String> {
    headers
        .get(X_FORWARDED_FOR)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| peer_addr.map(|addr| addr.ip().to_string()))
}
