//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, Response},
};
use http_inspector::{build_router, normalize_paths, App, AppState, HttpServer, ServiceConfig, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Peer address every in-process request appears to come from.
pub fn peer() -> SocketAddr {
    "10.1.2.3:40000".parse().unwrap()
}

/// Service driven in-process, with a mocked peer address.
pub fn app_with(config: ServiceConfig) -> App {
    normalize_paths(build_router(AppState::new(config)).layer(MockConnectInfo(peer())))
}

pub fn app() -> App {
    app_with(ServiceConfig::default())
}

/// Send one request through a fresh router.
pub async fn send(request: Request<Body>) -> Response<Body> {
    app().oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Start a real server on an ephemeral port.
pub async fn start_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
