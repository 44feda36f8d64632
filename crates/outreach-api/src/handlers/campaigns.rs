//! Campaign handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use outreach_common::types::{CampaignId, CampaignStatus};
use outreach_core::{generate_recommendations, select_winner, CampaignError, Recommendation};
use outreach_store::models::{Campaign, Variant};
use outreach_store::service::{NewCampaign, UpdateCampaign};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::auth::AppState;
use crate::handlers::{bad_request, service_error, ErrorResponse};

/// Query parameters for listing campaigns
#[derive(Debug, Deserialize)]
pub struct ListCampaignsQuery {
    pub status: Option<String>,
}

/// Campaign list response
#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub data: Vec<Campaign>,
    pub total: usize,
}

/// Request body for a status transition
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: CampaignStatus,
}

/// Winner response for an A/B test
#[derive(Debug, Serialize)]
pub struct WinnerResponse {
    pub criteria: String,
    pub winner: Option<Variant>,
}

fn campaign_error(err: CampaignError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let error = match err {
        CampaignError::NotFound => "not_found",
        _ => "lifecycle_error",
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: err.to_string(),
        }),
    )
}

/// List campaigns, optionally filtered by status
///
/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<CampaignListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let status = match query.status.as_deref() {
        Some(s) => Some(
            s.parse::<CampaignStatus>()
                .map_err(|_| bad_request("Unknown campaign status"))?,
        ),
        None => None,
    };

    let mut campaigns = state.stores.campaigns.get_all().await;
    if let Some(status) = status {
        campaigns.retain(|c| c.status == status);
    }

    Ok(Json(CampaignListResponse {
        total: campaigns.len(),
        data: campaigns,
    }))
}

/// Create a campaign
///
/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewCampaign>,
) -> Result<(StatusCode, Json<Campaign>), (StatusCode, Json<ErrorResponse>)> {
    if input.name.is_empty() {
        return Err(bad_request("Campaign name is required"));
    }

    let campaign = state.stores.campaigns.create(input).await;
    info!("Created campaign {}", campaign.id);

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Get a campaign by id
///
/// GET /api/v1/campaigns/:id
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state.stores.campaigns.get(id).await.map_err(service_error)?;
    Ok(Json(campaign))
}

/// Update a campaign
///
/// PUT /api/v1/campaigns/:id
pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
    Json(input): Json<UpdateCampaign>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state
        .stores
        .campaigns
        .update(id, input)
        .await
        .map_err(service_error)?;

    info!("Updated campaign {}", id);
    Ok(Json(campaign))
}

/// Delete a campaign
///
/// DELETE /api/v1/campaigns/:id
pub async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.stores.campaigns.delete(id).await.map_err(service_error)?;
    info!("Deleted campaign {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Transition a campaign to a new status
///
/// POST /api/v1/campaigns/:id/status
pub async fn set_campaign_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
    Json(input): Json<StatusRequest>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state
        .campaign_engine
        .transition(id, input.status)
        .await
        .map_err(|e| {
            error!("Failed to transition campaign {}: {}", id, e);
            campaign_error(e)
        })?;

    Ok(Json(campaign))
}

/// Leading variant for the campaign's A/B test
///
/// GET /api/v1/campaigns/:id/abtest/winner
pub async fn get_ab_winner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
) -> Result<Json<WinnerResponse>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state.stores.campaigns.get(id).await.map_err(service_error)?;

    let ab_test = campaign
        .ab_test()
        .ok_or_else(|| service_error(outreach_common::Error::not_found("A/B test")))?;

    Ok(Json(WinnerResponse {
        criteria: ab_test.winner_criteria.to_string(),
        winner: select_winner(ab_test).cloned(),
    }))
}

/// Recommendations for the campaign's A/B test
///
/// GET /api/v1/campaigns/:id/abtest/recommendations
pub async fn get_ab_recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CampaignId>,
) -> Result<Json<Vec<Recommendation>>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state.stores.campaigns.get(id).await.map_err(service_error)?;

    let ab_test = campaign
        .ab_test()
        .ok_or_else(|| service_error(outreach_common::Error::not_found("A/B test")))?;

    Ok(Json(generate_recommendations(ab_test)))
}
