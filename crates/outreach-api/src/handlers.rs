//! API request handlers

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod campaigns;
pub mod health;
pub mod leads;
pub mod templates;
pub mod threads;
pub mod validation;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Map a service error onto an HTTP response
pub(crate) fn service_error(err: outreach_common::Error) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.code().to_lowercase(),
            message: err.to_string(),
        }),
    )
}

/// Shorthand for a 400 validation failure
pub(crate) fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.to_string(),
        }),
    )
}
