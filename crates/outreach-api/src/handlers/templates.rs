//! Email template handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use outreach_common::types::EmailTemplateId;
use outreach_store::models::EmailTemplate;
use outreach_store::service::{NewTemplate, UpdateTemplate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::AppState;
use crate::handlers::{service_error, ErrorResponse};

/// Query parameters for listing templates
#[derive(Debug, Deserialize)]
pub struct ListTemplatesQuery {
    pub category: Option<String>,
}

/// Query parameters for searching templates
#[derive(Debug, Deserialize)]
pub struct SearchTemplatesQuery {
    pub q: String,
}

/// Template list response
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub data: Vec<EmailTemplate>,
    pub total: usize,
}

/// List templates, optionally filtered by category
///
/// GET /api/v1/templates
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTemplatesQuery>,
) -> Json<TemplateListResponse> {
    let templates = match query.category {
        Some(category) => state.stores.templates.get_by_category(&category).await,
        None => state.stores.templates.get_all().await,
    };

    Json(TemplateListResponse {
        total: templates.len(),
        data: templates,
    })
}

/// Search templates over name, subject and body
///
/// GET /api/v1/templates/search
pub async fn search_templates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchTemplatesQuery>,
) -> Json<TemplateListResponse> {
    let templates = state.stores.templates.search(&query.q).await;
    Json(TemplateListResponse {
        total: templates.len(),
        data: templates,
    })
}

/// Create a template
///
/// POST /api/v1/templates
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewTemplate>,
) -> (StatusCode, Json<EmailTemplate>) {
    let template = state.stores.templates.create(input).await;
    info!("Created template {}", template.id);
    (StatusCode::CREATED, Json(template))
}

/// Get a template by id
///
/// GET /api/v1/templates/:id
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailTemplateId>,
) -> Result<Json<EmailTemplate>, (StatusCode, Json<ErrorResponse>)> {
    let template = state.stores.templates.get(id).await.map_err(service_error)?;
    Ok(Json(template))
}

/// Update a template
///
/// PUT /api/v1/templates/:id
pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailTemplateId>,
    Json(input): Json<UpdateTemplate>,
) -> Result<Json<EmailTemplate>, (StatusCode, Json<ErrorResponse>)> {
    let template = state
        .stores
        .templates
        .update(id, input)
        .await
        .map_err(service_error)?;
    Ok(Json(template))
}

/// Delete a template
///
/// DELETE /api/v1/templates/:id
pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailTemplateId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.stores.templates.delete(id).await.map_err(service_error)?;
    info!("Deleted template {}", id);
    Ok(StatusCode::NO_CONTENT)
}
