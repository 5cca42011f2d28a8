//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Parse path identifiers and list query parameters
//! - Decode JSON bodies without requiring a Content-Type
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Invalid pagination values fall back to defaults instead of failing

use axum::http::{HeaderValue, Request};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::PaginationConfig;
use crate::store::Page;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the correlation ID already attached to a request.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Parse an employee identifier from a path segment.
pub fn parse_employee_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Decode a JSON request body.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Raw `page` / `limit` query parameters for the list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Pick `page` and `limit` out of decoded query pairs. The first occurrence
    /// of a repeated key wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            page: first("page"),
            limit: first("limit"),
        }
    }

    /// Resolve to a limit/offset window. Missing, malformed or < 1 values use
    /// the configured defaults.
    pub fn to_page(&self, defaults: &PaginationConfig) -> Page {
        let page = positive(self.page.as_deref()).unwrap_or(defaults.default_page);
        let limit = positive(self.limit.as_deref()).unwrap_or(defaults.default_limit);
        let offset = (page - 1).saturating_mul(limit);
        Page::new(limit, offset)
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok()).filter(|v| *v >= 1)
}
