//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (axum route table, compiled at startup)
//!     → matched handler, or the catch-all fallback
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Every request is answered: unknown paths and unsupported methods
//!   reach the catch-all rather than 404/405

pub mod catalog;
pub mod table;

pub use table::routes;
