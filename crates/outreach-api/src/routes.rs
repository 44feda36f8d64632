//! API routes

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use outreach_store::Stores;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, AppState};
use crate::handlers::{
    accounts, analytics, auth, campaigns, health, leads, templates, threads, validation,
};

/// Create the API router
pub fn create_router(stores: Stores) -> Router {
    let state = Arc::new(AppState::new(stores));

    // Auth routes (no session required)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/verification/send", post(auth::send_verification))
        .route("/verification/confirm", post(auth::confirm_verification));

    // Campaign routes
    let campaign_routes = Router::new()
        .route("/", get(campaigns::list_campaigns))
        .route("/", post(campaigns::create_campaign))
        .route("/:id", get(campaigns::get_campaign))
        .route("/:id", put(campaigns::update_campaign))
        .route("/:id", delete(campaigns::delete_campaign))
        .route("/:id/status", post(campaigns::set_campaign_status))
        .route("/:id/abtest/winner", get(campaigns::get_ab_winner))
        .route(
            "/:id/abtest/recommendations",
            get(campaigns::get_ab_recommendations),
        );

    // Lead routes
    let lead_routes = Router::new()
        .route("/", get(leads::list_leads))
        .route("/", post(leads::create_lead))
        .route("/:id", get(leads::get_lead))
        .route("/:id", put(leads::update_lead))
        .route("/:id", delete(leads::delete_lead))
        .route("/import", post(leads::import_leads))
        .route("/import/preview", post(leads::preview_import));

    // Email account routes
    let account_routes = Router::new()
        .route("/", get(accounts::list_accounts))
        .route("/", post(accounts::create_account))
        .route("/:id", get(accounts::get_account))
        .route("/:id", put(accounts::update_account))
        .route("/:id", delete(accounts::delete_account))
        .route("/:id/warmup", post(accounts::toggle_warmup))
        .route("/:id/warmup/advance", post(accounts::advance_warmup))
        .route("/:id/quota", get(accounts::get_quota));

    // Thread routes
    let thread_routes = Router::new()
        .route("/", get(threads::list_threads))
        .route("/", post(threads::create_thread))
        .route("/:id", get(threads::get_thread))
        .route("/:id", delete(threads::delete_thread))
        .route("/:id/messages", post(threads::append_message))
        .route("/:id/status", post(threads::set_thread_status));

    // Template routes
    let template_routes = Router::new()
        .route("/", get(templates::list_templates))
        .route("/", post(templates::create_template))
        .route("/search", get(templates::search_templates))
        .route("/:id", get(templates::get_template))
        .route("/:id", put(templates::update_template))
        .route("/:id", delete(templates::delete_template));

    // Analytics routes
    let analytics_routes = Router::new()
        .route("/overview", get(analytics::get_overview))
        .route("/export", get(analytics::export_csv));

    // Bulk validation routes
    let validation_routes = Router::new()
        .route("/bulk", post(validation::validate_bulk))
        .route("/history", get(validation::get_history))
        .route("/history/:id", delete(validation::delete_run))
        .route("/history/:id/export", get(validation::export_run));

    // Everything except health and auth requires a session
    let protected = Router::new()
        .nest("/campaigns", campaign_routes)
        .nest("/leads", lead_routes)
        .nest("/accounts", account_routes)
        .nest("/threads", thread_routes)
        .nest("/templates", template_routes)
        .nest("/analytics", analytics_routes)
        .nest("/validation", validation_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use outreach_store::store::Latency;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let stores = Stores::seed_with(Latency::none()).unwrap();
        TestServer::new(create_router(stores)).unwrap()
    }

    async fn login(server: &TestServer) -> String {
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({
                "email": "demo@outreach.dev",
                "password": "password123",
            }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let server = server();
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_routes_reject_missing_token() {
        let server = server();
        let response = server.get("/api/v1/campaigns").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_and_list_campaigns() {
        let server = server();
        let token = login(&server).await;

        let response = server
            .get("/api/v1/campaigns")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["total"].as_u64().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() {
        let server = server();
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({
                "email": "demo@outreach.dev",
                "password": "wrong",
            }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_campaign_crud_happy_path() {
        let server = server();
        let token = login(&server).await;

        let created = server
            .post("/api/v1/campaigns")
            .authorization_bearer(&token)
            .json(&json!({ "name": "API test campaign" }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<Value>()["id"].as_i64().unwrap();

        let fetched = server
            .get(&format!("/api/v1/campaigns/{}", id))
            .authorization_bearer(&token)
            .await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["status"], "draft");

        let deleted = server
            .delete(&format!("/api/v1/campaigns/{}", id))
            .authorization_bearer(&token)
            .await;
        deleted.assert_status(StatusCode::NO_CONTENT);

        let missing = server
            .get(&format!("/api/v1/campaigns/{}", id))
            .authorization_bearer(&token)
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ab_winner_from_fixture() {
        let server = server();
        let token = login(&server).await;

        // Fixture campaign 3 carries an open-rate A/B test won by Variant B.
        let response = server
            .get("/api/v1/campaigns/3/abtest/winner")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["criteria"], "open_rate");
        assert_eq!(body["winner"]["name"], "Variant B");
    }

    #[tokio::test]
    async fn test_analytics_overview_totals() {
        let server = server();
        let token = login(&server).await;

        let response = server
            .get("/api/v1/analytics/overview")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        // 835 + 312 + 0 across the three fixture campaigns
        let body = response.json::<Value>();
        assert_eq!(body["totals"]["sent"].as_u64().unwrap(), 1147);
    }

    #[tokio::test]
    async fn test_lead_import_flow() {
        let server = server();
        let token = login(&server).await;

        let response = server
            .post("/api/v1/leads/import")
            .authorization_bearer(&token)
            .json(&json!({
                "csv": "Email,First\nnew@example.com,New\n,Missing\n",
                "mapping": { "Email": "email", "First": "first_name" },
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["imported"].as_u64().unwrap(), 1);
        assert_eq!(body["leads"][0]["email"], "new@example.com");
    }
}
