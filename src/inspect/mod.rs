//! Request introspection.
//!
//! # Data Flow
//! ```text
//! axum Request
//!     → http::extract (buffer body up to limit, collect params & peer)
//!     → body.rs (decode JSON / form / text / raw)
//!     → InboundRequest
//!     → snapshot.rs (format: headers, query, cookies, client IP)
//!     → RequestSnapshot (serialized once, then dropped)
//! ```

pub mod body;
pub mod client_ip;
pub mod fields;
pub mod numeric;
pub mod snapshot;

use chrono::{SecondsFormat, Utc};

pub use client_ip::resolve_client_ip;
pub use fields::{render_headers, FieldMap, FieldValue};
pub use numeric::parse_leading_int;
pub use snapshot::{AnnotatedSnapshot, InboundRequest, RequestSnapshot};

/// Current UTC time as ISO-8601 with milliseconds, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
