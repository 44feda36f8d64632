//! Analytics handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use outreach_core::{analytics_csv, AnalyticsOverview};
use std::sync::Arc;

use crate::auth::AppState;

/// Aggregated metrics and per-campaign rates
///
/// GET /api/v1/analytics/overview
pub async fn get_overview(State(state): State<Arc<AppState>>) -> Json<AnalyticsOverview> {
    let campaigns = state.stores.campaigns.get_all().await;
    Json(AnalyticsOverview::build(&campaigns))
}

/// Analytics overview as CSV
///
/// GET /api/v1/analytics/export
pub async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let campaigns = state.stores.campaigns.get_all().await;
    let csv = analytics_csv(&AnalyticsOverview::build(&campaigns));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"campaign_analytics.csv\"",
            ),
        ],
        csv,
    )
}
