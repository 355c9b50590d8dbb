//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AdminConfig;
use crate::services::{FsAssetStore, ProductCatalog, RecordLocks};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: SqlitePool,
    assets: FsAssetStore,
    locks: RecordLocks,
}

impl AppState {
    /// Build state from configuration and an open pool.
    #[must_use]
    pub fn new(config: AdminConfig, pool: SqlitePool) -> Self {
        let assets = FsAssetStore::new(config.uploads_dir.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                assets,
                locks: RecordLocks::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    #[must_use]
    pub fn assets(&self) -> &FsAssetStore {
        &self.inner.assets
    }

    /// Lifecycle coordinator over this state's stores.
    #[must_use]
    pub fn catalog(&self) -> ProductCatalog<'_, FsAssetStore> {
        ProductCatalog::new(&self.inner.pool, &self.inner.assets, &self.inner.locks)
    }
}
