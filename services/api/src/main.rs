use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use api::{ApiConfig, AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting API service");

    let config = ApiConfig::from_env()?;
    let app_state = AppState::new(config.jwt.clone());

    // Start the web server
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
