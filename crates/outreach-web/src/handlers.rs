//! Web UI Handlers
//!
//! Request handlers for the dashboard pages.

use crate::{AppState, StaticAssets};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use outreach_core::{AnalyticsOverview, WarmupPlan};
use serde::Deserialize;
use serde_json::json;

/// Health check handler
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// Serve static files
pub async fn static_file(Path(path): Path<String>) -> impl IntoResponse {
    match StaticAssets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn render(state: &AppState, name: &str, context: &serde_json::Value) -> axum::response::Response {
    match state.templates.render(name, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Index page - the dashboard
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let campaigns = state.stores.campaigns.get_all().await;
    let overview = AnalyticsOverview::build(&campaigns);

    let context = json!({
        "title": "Dashboard",
        "active_page": "dashboard",
        "api_url": state.config.api_url,
        "overview": overview,
    });

    render(&state, "dashboard", &context)
}

/// Campaigns page
pub async fn campaigns(State(state): State<AppState>) -> impl IntoResponse {
    let campaigns = state.stores.campaigns.get_all().await;

    let context = json!({
        "title": "Campaigns",
        "active_page": "campaigns",
        "api_url": state.config.api_url,
        "campaigns": campaigns,
    });

    render(&state, "campaigns", &context)
}

/// Leads page
pub async fn leads(State(state): State<AppState>) -> impl IntoResponse {
    let leads = state.stores.leads.get_all().await;

    let context = json!({
        "title": "Leads",
        "active_page": "leads",
        "api_url": state.config.api_url,
        "leads": leads,
    });

    render(&state, "leads", &context)
}

/// Accounts page with warmup plans
pub async fn accounts(State(state): State<AppState>) -> impl IntoResponse {
    let accounts = state.stores.accounts.get_all().await;
    let rows: Vec<serde_json::Value> = accounts
        .iter()
        .map(|a| {
            json!({
                "account": a,
                "plan": WarmupPlan::for_account(a),
            })
        })
        .collect();

    let context = json!({
        "title": "Email Accounts",
        "active_page": "accounts",
        "api_url": state.config.api_url,
        "accounts": rows,
    });

    render(&state, "accounts", &context)
}

/// Inbox page
pub async fn inbox(State(state): State<AppState>) -> impl IntoResponse {
    let threads = state.stores.threads.get_all().await;

    let context = json!({
        "title": "Inbox",
        "active_page": "inbox",
        "api_url": state.config.api_url,
        "threads": threads,
    });

    render(&state, "inbox", &context)
}

/// Login page query parameters
#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub error: Option<String>,
}

/// Login page
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    let context = json!({
        "title": "Login",
        "api_url": state.config.api_url,
        "error": query.error,
    });

    render(&state, "login", &context)
}

/// Login form data
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login form submission
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    match state.auth.login(&form.email, &form.password).await {
        Ok(outcome) => {
            tracing::info!("Dashboard login for {}", outcome.user.email);
            Redirect::to("/")
        }
        Err(e) => {
            tracing::warn!("Dashboard login failed for {}: {}", form.email, e);
            Redirect::to("/login?error=invalid")
        }
    }
}

/// Logout handler
pub async fn logout() -> impl IntoResponse {
    Redirect::to("/login")
}
