//! Authentication module

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use outreach_core::{AuthService, CampaignEngine, VerificationService, WarmupEngine};
use outreach_store::Stores;
use std::sync::Arc;
use tracing::warn;

use crate::handlers::ErrorResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub auth: AuthService,
    pub verification: VerificationService,
    pub campaign_engine: CampaignEngine,
    pub warmup_engine: WarmupEngine,
}

impl AppState {
    /// Build the state from seeded stores
    pub fn new(stores: Stores) -> Self {
        Self {
            auth: AuthService::new(stores.users.clone()),
            verification: VerificationService::new(),
            campaign_engine: CampaignEngine::new(stores.campaigns.clone()),
            warmup_engine: WarmupEngine::new(stores.accounts.clone()),
            stores,
        }
    }
}

/// Extract a bearer token from the request
pub fn extract_token(req: &Request) -> Option<&str> {
    let auth = req.headers().get("authorization")?;
    let auth_str = auth.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// Require a valid session token; stores the authenticated user as a request
/// extension.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&req).map(str::to_string) else {
        warn!("Missing bearer token on {}", req.uri().path());
        return unauthorized("Missing bearer token");
    };

    let Some(user) = state.auth.authenticate(&token).await else {
        warn!("Invalid session token on {}", req.uri().path());
        return unauthorized("Invalid or expired session");
    };

    req.extensions_mut().insert(user);
    next.run(req).await
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}
