//! # Callboard API Main Entry Point
//!
//! This is the main entry point for the Callboard API service.

use callboard::{config::ConfigLoader, db, server::run_server, telemetry};
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    telemetry::init_tracing(&config);

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let pool = db::init_pool(&config).await?;
    migration::Migrator::up(&pool, None).await?;

    run_server(config, pool).await
}
