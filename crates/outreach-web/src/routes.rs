//! Web UI Routes
//!
//! Defines routes for the dashboard.

use crate::handlers;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

/// Create the web UI router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Static assets
        .route("/static/*path", get(handlers::static_file))
        // Page routes
        .route("/", get(handlers::index))
        .route("/campaigns", get(handlers::campaigns))
        .route("/leads", get(handlers::leads))
        .route("/accounts", get(handlers::accounts))
        .route("/inbox", get(handlers::inbox))
        .route("/login", get(handlers::login_page))
        .route("/login", post(handlers::login_submit))
        .route("/logout", get(handlers::logout))
        // Health check
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_store::store::Latency;
    use outreach_store::Stores;

    #[tokio::test]
    async fn test_router_builds_with_seeded_stores() {
        let stores = Stores::seed_with(Latency::none()).unwrap();
        let state = AppState::new(crate::WebConfig::default(), stores);
        let _router = create_router(state);
    }
}
