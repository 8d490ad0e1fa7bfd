//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware stack)
//!     → request.rs (request ID span)
//!     → routing (method + path dispatch)
//!     → extract.rs (buffer & decode body → InboundRequest)
//!     → handlers (JSON response)
//! ```

pub mod extract;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_router, normalize_paths, App, AppState, HttpServer};
