//! Asset maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! # Show which uploaded images no product references
//! shop-cli assets prune --dry-run
//!
//! # Remove them
//! shop-cli assets prune
//! ```
//!
//! Uploads are stored before their product row is written, so pruning while
//! the server is accepting forms can remove an image a moment before it is
//! referenced. Run it with the server stopped.

use std::collections::BTreeSet;

use shop_catalog_admin::db::ProductRepository;
use shop_catalog_admin::services::{AssetStore, FsAssetStore};
use shop_catalog_core::AssetName;
use sqlx::SqlitePool;

use super::{CommandError, connect};

/// Outcome of a prune run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Assets no product references.
    pub unreferenced: Vec<AssetName>,
    /// Unreferenced assets that were removed (empty on a dry run).
    pub removed: Vec<AssetName>,
    /// Unreferenced assets that could not be removed.
    pub failed: Vec<AssetName>,
}

/// Remove uploaded images that no product references.
///
/// # Errors
///
/// Returns `CommandError` if the database or the uploads directory cannot be read.
pub async fn prune(dry_run: bool) -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let assets = FsAssetStore::new(config.uploads_dir);

    let report = prune_unreferenced(&pool, &assets, dry_run).await?;

    #[allow(clippy::print_stdout)]
    for name in &report.unreferenced {
        let status = if dry_run {
            "would remove"
        } else if report.removed.contains(name) {
            "removed"
        } else {
            "failed"
        };
        println!("{status}\t{name}");
    }

    tracing::info!(
        unreferenced = report.unreferenced.len(),
        removed = report.removed.len(),
        failed = report.failed.len(),
        dry_run,
        "Asset prune complete"
    );
    Ok(())
}

/// Find, and unless `dry_run` remove, assets no product references.
///
/// # Errors
///
/// Returns `CommandError` if either store cannot be listed. Individual
/// removal failures are collected in the report instead.
pub async fn prune_unreferenced<A: AssetStore>(
    pool: &SqlitePool,
    assets: &A,
    dry_run: bool,
) -> Result<PruneReport, CommandError> {
    let referenced: BTreeSet<AssetName> = ProductRepository::new(pool)
        .list_image_names()
        .await?
        .into_iter()
        .collect();

    let unreferenced: Vec<AssetName> = assets
        .list()
        .await?
        .into_iter()
        .filter(|name| !referenced.contains(name))
        .collect();

    let mut report = PruneReport {
        unreferenced,
        ..PruneReport::default()
    };
    if dry_run {
        return Ok(report);
    }

    for name in &report.unreferenced {
        match assets.remove(name).await {
            Ok(()) => report.removed.push(name.clone()),
            Err(e) => {
                tracing::warn!(asset = %name, error = %e, "Failed to remove unreferenced asset");
                report.failed.push(name.clone());
            }
        }
    }

    Ok(report)
}
