//! `/`: service description and endpoint catalog.

use axum::Json;
use serde::Serialize;

use crate::inspect::{iso_timestamp, InboundRequest};
use crate::routing::catalog::{Catalog, ENDPOINTS};

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub description: &'static str,
    pub endpoints: Catalog,
    pub usage: &'static str,
    pub timestamp: String,
}

/// `GET /`: static description of the service. The request body is still
/// decoded so a malformed one fails here too.
pub async fn describe(_request: InboundRequest) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "HTTP Request & Response Service",
        description: "A simple service inspired by httpbin for debugging HTTP requests",
        endpoints: Catalog(ENDPOINTS),
        usage: "Send any HTTP request to any endpoint to see the request details",
        timestamp: iso_timestamp(),
    })
}
