//! Outreach - Campaign manager entry point

use anyhow::Result;
use outreach_common::config::Config;
use outreach_store::Stores;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting Outreach campaign manager...");

    // Load configuration (defaults when no file is present)
    let config = Config::load()?;

    // Seed the mock stores from the embedded fixtures
    let stores = Stores::seed(&config.store)?;
    info!("Mock backend ready");

    // Start API server
    let api_handle = {
        let stores = stores.clone();
        let bind = format!("{}:{}", config.server.bind_address, config.api.port);
        tokio::spawn(async move {
            let app = outreach_api::create_router(stores);
            let listener = match tokio::net::TcpListener::bind(&bind).await {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::error!("Failed to bind API server on {}: {}", bind, e);
                    return;
                }
            };
            info!("Starting API server on {}", bind);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {}", e);
            }
        })
    };

    // Start Web UI server if enabled
    let web_handle = if config.web.enabled {
        let web_config = outreach_web::WebConfig {
            bind: config.web.bind.clone(),
            api_url: config.web.api_url.clone(),
        };
        let stores = stores.clone();
        info!("Starting Web UI server on {}", config.web.bind);

        Some(tokio::spawn(async move {
            if let Err(e) = outreach_web::run(web_config, stores).await {
                tracing::error!("Web UI server error: {}", e);
            }
        }))
    } else {
        info!("Web UI server disabled");
        None
    };

    info!("Outreach started successfully");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Cleanup
    api_handle.abort();
    if let Some(handle) = web_handle {
        handle.abort();
    }

    info!("Outreach shutdown complete");

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,outreach=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}
