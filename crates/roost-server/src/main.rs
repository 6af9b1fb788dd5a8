//! ROOST Server — application entry point.

use roost_server::{AppState, ServerConfig, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roost=info".parse()?))
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let manager = roost_db::DbManager::connect(&config.db).await?;
    roost_db::run_migrations(&manager.client()).await?;

    let state = AppState::new(manager.client(), config.tokens.clone());
    let app = router(state);

    tracing::info!(addr = %config.bind_addr, "Starting ROOST server");
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
