//! Command implementations.

pub mod assets;
pub mod migrate;
pub mod products;

use shop_catalog_admin::config::{AdminConfig, ConfigError};
use shop_catalog_admin::db::{self, RepositoryError};
use shop_catalog_admin::services::AssetError;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A product query failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Listing or removing an asset failed.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Load configuration and open the catalog database.
async fn connect() -> Result<(AdminConfig, SqlitePool), CommandError> {
    let config = AdminConfig::from_env()?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    Ok((config, pool))
}
