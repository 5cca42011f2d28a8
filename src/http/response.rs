//! Response mapping.
//!
//! # Responsibilities
//! - Map API errors to HTTP status codes
//! - Build plain-text error bodies
//!
//! # Design Decisions
//! - Only the store's not-found signal becomes 404
//! - Timeouts and every other failure are 500 with the error's text

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";
pub const INVALID_ID_MESSAGE: &str = "Invalid employee ID";
pub const DELETED_MESSAGE: &str = "Employee deleted successfully";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response();
        }

        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// 400 with a plain-text reason.
pub fn bad_request(reason: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, reason.into()).into_response()
}
