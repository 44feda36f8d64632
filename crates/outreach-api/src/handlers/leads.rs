//! Lead handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_common::types::LeadId;
use outreach_core::{parse_csv_preview, parse_leads, CsvPreview, FieldMapping};
use outreach_store::models::Lead;
use outreach_store::service::{NewLead, UpdateLead};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::AppState;
use crate::handlers::{bad_request, service_error, ErrorResponse};

/// Lead list response
#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub data: Vec<Lead>,
    pub total: usize,
}

/// Request body carrying raw CSV text
#[derive(Debug, Deserialize)]
pub struct CsvRequest {
    pub csv: String,
}

/// Request body for importing leads from CSV
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub csv: String,
    pub mapping: FieldMapping,
}

/// Import outcome
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub leads: Vec<Lead>,
}

/// List leads
///
/// GET /api/v1/leads
pub async fn list_leads(State(state): State<Arc<AppState>>) -> Json<LeadListResponse> {
    let leads = state.stores.leads.get_all().await;
    Json(LeadListResponse {
        total: leads.len(),
        data: leads,
    })
}

/// Create a lead
///
/// POST /api/v1/leads
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewLead>,
) -> Result<(StatusCode, Json<Lead>), (StatusCode, Json<ErrorResponse>)> {
    if input.email.is_empty() {
        return Err(bad_request("Lead email is required"));
    }

    let lead = state.stores.leads.create(input).await;
    info!("Created lead {}", lead.id);
    Ok((StatusCode::CREATED, Json(lead)))
}

/// Get a lead by id
///
/// GET /api/v1/leads/:id
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LeadId>,
) -> Result<Json<Lead>, (StatusCode, Json<ErrorResponse>)> {
    let lead = state.stores.leads.get(id).await.map_err(service_error)?;
    Ok(Json(lead))
}

/// Update a lead
///
/// PUT /api/v1/leads/:id
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LeadId>,
    Json(input): Json<UpdateLead>,
) -> Result<Json<Lead>, (StatusCode, Json<ErrorResponse>)> {
    let lead = state
        .stores
        .leads
        .update(id, input)
        .await
        .map_err(service_error)?;
    Ok(Json(lead))
}

/// Delete a lead
///
/// DELETE /api/v1/leads/:id
pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<LeadId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.stores.leads.delete(id).await.map_err(service_error)?;
    info!("Deleted lead {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Preview the header and first rows of a CSV before mapping
///
/// POST /api/v1/leads/import/preview
pub async fn preview_import(
    Json(input): Json<CsvRequest>,
) -> Result<Json<CsvPreview>, (StatusCode, Json<ErrorResponse>)> {
    let preview = parse_csv_preview(&input.csv).map_err(service_error)?;
    Ok(Json(preview))
}

/// Import leads from CSV with a column mapping
///
/// POST /api/v1/leads/import
pub async fn import_leads(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportResponse>), (StatusCode, Json<ErrorResponse>)> {
    let new_leads = parse_leads(&input.csv, &input.mapping).map_err(service_error)?;
    let leads = state.stores.leads.create_many(new_leads).await;

    info!("Imported {} leads from CSV", leads.len());
    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            imported: leads.len(),
            leads,
        }),
    ))
}
