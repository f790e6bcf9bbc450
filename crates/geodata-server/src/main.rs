//! Geodata Server - Main entry point

use anyhow::Result;
use geodata_common::logging::{init_logging, LogConfig};
use tracing::info;

use geodata_server::{api, config::Config, db};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("geodata-server".to_string())
        .filter_directives("geodata_server=debug,tower_http=debug,sqlx=info".to_string())
        .build();

    // Environment variables take precedence over the built-in defaults
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    info!("Starting Geodata Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_pool(&config.database).await?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    info!("Database migrations completed");

    api::serve(config, pool).await?;

    info!("Server shut down gracefully");

    Ok(())
}
