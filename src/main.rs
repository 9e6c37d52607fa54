use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use meal_guard::{config::AppConfig, routes::{router, AppState, ANALYZE_MEAL_PATH}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    if config.gateway_api_key.is_none() {
        tracing::warn!("⚠️ AI gateway key not set; analysis requests will fail until it is configured");
    }
    tracing::info!("Using API key: {}", config.masked_api_key());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, path = ANALYZE_MEAL_PATH, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}
