//! Email account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_common::types::EmailAccountId;
use outreach_core::WarmupPlan;
use outreach_store::models::EmailAccount;
use outreach_store::service::{NewEmailAccount, UpdateEmailAccount};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::auth::AppState;
use crate::handlers::{bad_request, service_error, ErrorResponse};

/// Account list response
#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    pub data: Vec<EmailAccount>,
    pub total: usize,
}

/// List accounts
///
/// GET /api/v1/accounts
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<AccountListResponse> {
    let accounts = state.stores.accounts.get_all().await;
    Json(AccountListResponse {
        total: accounts.len(),
        data: accounts,
    })
}

/// Create an account
///
/// POST /api/v1/accounts
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewEmailAccount>,
) -> Result<(StatusCode, Json<EmailAccount>), (StatusCode, Json<ErrorResponse>)> {
    if input.email.is_empty() {
        return Err(bad_request("Account email is required"));
    }

    let account = state.stores.accounts.create(input).await;
    info!("Created email account {}", account.id);
    Ok((StatusCode::CREATED, Json(account)))
}

/// Get an account by id
///
/// GET /api/v1/accounts/:id
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
) -> Result<Json<EmailAccount>, (StatusCode, Json<ErrorResponse>)> {
    let account = state.stores.accounts.get(id).await.map_err(service_error)?;
    Ok(Json(account))
}

/// Update an account
///
/// PUT /api/v1/accounts/:id
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
    Json(input): Json<UpdateEmailAccount>,
) -> Result<Json<EmailAccount>, (StatusCode, Json<ErrorResponse>)> {
    let account = state
        .stores
        .accounts
        .update(id, input)
        .await
        .map_err(service_error)?;
    Ok(Json(account))
}

/// Delete an account
///
/// DELETE /api/v1/accounts/:id
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.stores.accounts.delete(id).await.map_err(service_error)?;
    info!("Deleted email account {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle warmup for an account
///
/// POST /api/v1/accounts/:id/warmup
pub async fn toggle_warmup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
) -> Result<Json<EmailAccount>, (StatusCode, Json<ErrorResponse>)> {
    let account = state.warmup_engine.toggle(id).await.map_err(service_error)?;
    Ok(Json(account))
}

/// Advance warmup by one step
///
/// POST /api/v1/accounts/:id/warmup/advance
pub async fn advance_warmup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
) -> Result<Json<EmailAccount>, (StatusCode, Json<ErrorResponse>)> {
    let account = state.warmup_engine.advance(id).await.map_err(service_error)?;
    Ok(Json(account))
}

/// Current sending quota for an account
///
/// GET /api/v1/accounts/:id/quota
pub async fn get_quota(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailAccountId>,
) -> Result<Json<WarmupPlan>, (StatusCode, Json<ErrorResponse>)> {
    let plan = state.warmup_engine.plan(id).await.map_err(service_error)?;
    Ok(Json(plan))
}
