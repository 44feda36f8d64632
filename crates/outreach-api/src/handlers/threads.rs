//! Email thread handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use outreach_common::types::{EmailThreadId, MessageDirection, ThreadStatus};
use outreach_store::models::{EmailThread, Message};
use outreach_store::service::NewThread;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::AppState;
use crate::handlers::{service_error, ErrorResponse};

/// Thread list response
#[derive(Debug, Serialize)]
pub struct ThreadListResponse {
    pub data: Vec<EmailThread>,
    pub total: usize,
}

/// Request body for appending a message
#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub from: String,
    pub to: String,
    pub body: String,
    pub direction: MessageDirection,
}

/// Request body for a thread status change
#[derive(Debug, Deserialize)]
pub struct ThreadStatusRequest {
    pub status: ThreadStatus,
}

/// List threads
///
/// GET /api/v1/threads
pub async fn list_threads(State(state): State<Arc<AppState>>) -> Json<ThreadListResponse> {
    let threads = state.stores.threads.get_all().await;
    Json(ThreadListResponse {
        total: threads.len(),
        data: threads,
    })
}

/// Create a thread
///
/// POST /api/v1/threads
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewThread>,
) -> (StatusCode, Json<EmailThread>) {
    let thread = state.stores.threads.create(input).await;
    info!("Created thread {}", thread.id);
    (StatusCode::CREATED, Json(thread))
}

/// Get a thread by id
///
/// GET /api/v1/threads/:id
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailThreadId>,
) -> Result<Json<EmailThread>, (StatusCode, Json<ErrorResponse>)> {
    let thread = state.stores.threads.get(id).await.map_err(service_error)?;
    Ok(Json(thread))
}

/// Append a message to a thread. Inbound messages flip the thread to replied.
///
/// POST /api/v1/threads/:id/messages
pub async fn append_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailThreadId>,
    Json(input): Json<AppendMessageRequest>,
) -> Result<Json<EmailThread>, (StatusCode, Json<ErrorResponse>)> {
    let message = Message {
        from: input.from,
        to: input.to,
        body: input.body,
        timestamp: Utc::now(),
        direction: input.direction,
    };

    let thread = state
        .stores
        .threads
        .append_message(id, message)
        .await
        .map_err(service_error)?;
    Ok(Json(thread))
}

/// Set the thread status
///
/// POST /api/v1/threads/:id/status
pub async fn set_thread_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailThreadId>,
    Json(input): Json<ThreadStatusRequest>,
) -> Result<Json<EmailThread>, (StatusCode, Json<ErrorResponse>)> {
    let thread = state
        .stores
        .threads
        .set_status(id, input.status)
        .await
        .map_err(service_error)?;
    Ok(Json(thread))
}

/// Delete a thread
///
/// DELETE /api/v1/threads/:id
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EmailThreadId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.stores.threads.delete(id).await.map_err(service_error)?;
    info!("Deleted thread {}", id);
    Ok(StatusCode::NO_CONTENT)
}
