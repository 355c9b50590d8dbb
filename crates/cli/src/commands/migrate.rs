//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shop-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (default: `sqlite://db/shop.db`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/admin/migrations/` and are embedded into the
//! admin library, so this command and the server apply the same set.

use shop_catalog_admin::db;

use super::{CommandError, connect};

/// Apply pending catalog migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let (_, pool) = connect().await?;

    tracing::info!("Running catalog migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
