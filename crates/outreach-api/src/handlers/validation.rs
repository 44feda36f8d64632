//! Bulk validation handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use outreach_common::types::ValidationRunId;
use outreach_core::{invalid_emails_csv, valid_emails_text, BulkValidation, EmailValidator};
use outreach_store::models::ValidationRun;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::AppState;
use crate::handlers::{bad_request, service_error, ErrorResponse};

/// Request body for bulk validation
#[derive(Debug, Deserialize)]
pub struct BulkValidationRequest {
    /// Original file name, kept in the run history
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Raw text with one address (or CSV row) per line
    pub text: String,
}

fn default_file_name() -> String {
    "pasted_list.txt".to_string()
}

/// Query parameters for exporting a run
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// "valid" or "invalid"
    pub kind: String,
}

/// Validate a pasted or uploaded address list
///
/// POST /api/v1/validation/bulk
pub async fn validate_bulk(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BulkValidationRequest>,
) -> Json<BulkValidation> {
    let mut validator = EmailValidator::new();
    let result = validator.validate_bulk(&input.text, |_| {});

    state
        .stores
        .validation_runs
        .record(
            input.file_name,
            result.valid.clone(),
            result.risky.clone(),
            result.invalid.clone(),
        )
        .await;

    info!(
        "Validated {} addresses: {} valid, {} risky, {} invalid",
        result.total,
        result.valid.len(),
        result.risky.len(),
        result.invalid.len()
    );

    Json(result)
}

/// Past validation runs
///
/// GET /api/v1/validation/history
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<ValidationRun>> {
    Json(state.stores.validation_runs.history().await)
}

/// Delete a recorded run
///
/// DELETE /api/v1/validation/history/:id
pub async fn delete_run(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ValidationRunId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .stores
        .validation_runs
        .delete(id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export one bucket of a recorded run
///
/// GET /api/v1/validation/history/:id/export?kind=valid|invalid
pub async fn export_run(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ValidationRunId>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let run = state
        .stores
        .validation_runs
        .get(id)
        .await
        .map_err(service_error)?;

    let (content, content_type, filename) = match query.kind.as_str() {
        "valid" => (
            valid_emails_text(&run.valid),
            "text/plain",
            "valid_emails.txt",
        ),
        "invalid" => (
            invalid_emails_csv(&run.invalid),
            "text/csv",
            "invalid_emails.csv",
        ),
        _ => return Err(bad_request("Export kind must be valid or invalid")),
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    ))
}
