//! Business logic services for the catalog.
//!
//! # Services
//!
//! - `assets` - Storage for uploaded product images
//! - `catalog` - Product lifecycle across the record and asset stores
//! - `locks` - Per-product write serialization

pub mod assets;
pub mod catalog;
pub mod locks;

pub use assets::{AssetError, AssetStore, FsAssetStore};
pub use catalog::{AssetCleanup, CatalogError, DeleteOutcome, ProductCatalog, UpdateOutcome};
pub use locks::RecordLocks;
