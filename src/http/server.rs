//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the route table and middleware stack once at startup
//! - Normalise trailing slashes before route dispatch
//! - Bind server to listener with peer-address info
//! - Serve until the shutdown broadcast or an OS signal

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{
        header::{CONTENT_ENCODING, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router, ServiceExt,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowHeaders, Any as AnyOrigin, CorsLayer},
    decompression::RequestDecompressionLayer,
    normalize_path::NormalizePath,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::error::{internal_error_response, InspectError};
use crate::http::request::make_request_span;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing;

/// Application state injected into handlers and extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// HTTP server for the inspection service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` resolves. In-flight requests are drained first.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_bytes = self.config.limits.max_body_bytes,
            "HTTP server starting"
        );

        let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(
            normalize_paths(self.router),
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The service as served, for driving in-process.
    pub fn app(&self) -> App {
        normalize_paths(self.router.clone())
    }
}

/// The layered router behind trailing-slash normalisation.
pub type App = NormalizePath<Router>;

/// Strip trailing slashes before `router` dispatches, so `/get/` is `/get`.
///
/// `Router::layer` middleware runs after route matching, so the rewrite has
/// to wrap the router from outside.
pub fn normalize_paths(router: Router) -> App {
    NormalizePath::trim_trailing_slash(router)
}

/// Build the router with all middleware layers.
///
/// Layers run outermost first: trace span, metrics, CORS, response
/// compression, encoding rejection, request decompression, panic capture,
/// then routing.
pub fn build_router(state: AppState) -> Router {
    routing::routes()
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(RequestDecompressionLayer::new())
        .layer(middleware::from_fn(reject_unsupported_encoding))
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Replace the bodiless `415` the request decompressor answers for an
/// unknown `Content-Encoding` with the standard 500 body.
async fn reject_unsupported_encoding(request: Request, next: Next) -> Response {
    let encoding = request
        .headers()
        .get(CONTENT_ENCODING)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let response = next.run(request).await;
    match encoding {
        Some(encoding)
            if response.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE
                && !response.headers().contains_key(CONTENT_TYPE) =>
        {
            InspectError::UnsupportedEncoding(encoding).into_response()
        }
        _ => response,
    }
}

/// Convert a handler panic into the standard 500 body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "Unknown panic".to_owned()
    };

    tracing::error!(panic = %message, "Handler panicked");
    internal_error_response(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "boom");
    }

    #[tokio::test]
    async fn test_app_trims_trailing_slash() {
        use tower::ServiceExt as _;

        let app = HttpServer::new(ServiceConfig::default()).app();
        let request = axum::http::Request::builder()
            .uri("/status/418/")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_server_keeps_config() {
        let mut config = ServiceConfig::default();
        config.listener.port = 4567;
        let server = HttpServer::new(config);
        assert_eq!(server.config().listener.port, 4567);
    }
}
