//! HTTP request inspection service library.
//!
//! Echoes a structured description of every request it receives, with
//! endpoints for status-code and delay injection.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod inspect;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServiceConfig;
pub use error::InspectError;
pub use http::{build_router, normalize_paths, App, AppState, HttpServer};
pub use inspect::{InboundRequest, RequestSnapshot};
pub use lifecycle::Shutdown;
