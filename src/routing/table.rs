//! The static route table.
//!
//! Method-specific routes hand every other method to the catch-all
//! handler instead of answering 405, so `POST /get` is echoed with a note
//! just like an unknown path.
//!
//! Paths arrive here with trailing slashes already stripped, so `/get/`
//! and `/anything/` match `/get` and `/anything`. Matching is
//! case-sensitive.

use axum::{
    routing::{any, delete, get, patch, post, put},
    Router,
};

use crate::handlers::{delay, echo, views, service_info, status};
use crate::http::AppState;

/// Build the route table. Compiled once at startup, immutable afterwards.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info::describe).fallback(echo::catch_all))
        .route("/get", get(echo::snapshot).fallback(echo::catch_all))
        .route("/post", post(echo::snapshot).fallback(echo::catch_all))
        .route("/put", put(echo::snapshot).fallback(echo::catch_all))
        .route("/delete", delete(echo::snapshot).fallback(echo::catch_all))
        .route("/patch", patch(echo::snapshot).fallback(echo::catch_all))
        .route("/headers", any(views::headers))
        .route("/ip", any(views::ip))
        .route("/user-agent", any(views::user_agent))
        .route("/json", any(views::json))
        .route("/status/{code}", any(status::respond_with_status))
        .route("/delay/{seconds}", any(delay::respond_after_delay))
        .route("/anything", any(echo::snapshot))
        .route("/anything/{*path}", any(echo::snapshot))
        .fallback(echo::catch_all)
}
