//! `InboundRequest` extractor.
//!
//! Buffers the body up to `limits.max_body_bytes`, decodes it, and collects
//! the route parameters and peer address the formatter needs. Must be the
//! last extractor of a handler since it consumes the body.

use std::net::SocketAddr;

use axum::{
    extract::{
        connect_info::MockConnectInfo, ConnectInfo, FromRef, FromRequest, FromRequestParts, RawPathParams,
        Request,
    },
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        Extensions,
    },
};

use crate::error::InspectError;
use crate::http::server::AppState;
use crate::inspect::body::parse_body;
use crate::inspect::InboundRequest;

/// Transport peer address of the connection.
///
/// Recorded by `into_make_service_with_connect_info` when serving sockets;
/// when the router is driven in-process, the address supplied through
/// `MockConnectInfo` is used instead.
pub fn peer_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
        .or_else(|| {
            extensions
                .get::<MockConnectInfo<SocketAddr>>()
                .map(|MockConnectInfo(addr)| *addr)
        })
}

impl<S> FromRequest<S> for InboundRequest
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = InspectError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let limit = AppState::from_ref(state).config.limits.max_body_bytes;
        let (mut parts, body) = req.into_parts();

        // The fallback route has no matched path, hence no params.
        let params = RawPathParams::from_request_parts(&mut parts, state)
            .await
            .map(|raw| {
                raw.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        let peer_addr = peer_addr(&parts.extensions);

        let declared_length = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<usize>().ok());
        if declared_length.is_some_and(|len| len > limit) {
            return Err(InspectError::BodyTooLarge { limit });
        }

        let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
            let message = err.to_string();
            if message.contains("length limit exceeded") {
                InspectError::BodyTooLarge { limit }
            } else {
                InspectError::BodyRead(message)
            }
        })?;

        let content_type = parts.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let body = parse_body(content_type, &bytes)?;

        Ok(InboundRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            peer_addr,
            params,
            body,
        })
    }
}
