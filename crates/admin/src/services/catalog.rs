//! Product lifecycle: keeps product records and their image assets in step.
//!
//! Every write that touches both stores goes through [`ProductCatalog`]:
//!
//! 1. **Create** - the upload (if any) is already stored; insert the record
//!    pointing at it.
//! 2. **Update** - under the product's lock, read the current image, resolve
//!    the final image, overwrite the record, then remove the superseded asset.
//! 3. **Delete** - under the product's lock, read the record, remove its
//!    asset, then delete the record regardless of how the removal went.
//!
//! Asset removal is best-effort throughout: failures are logged and reported
//! in the outcome, never turned into errors.

use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use shop_catalog_core::{AssetName, ProductId, resolve_image, superseded_image};

use super::assets::AssetStore;
use super::locks::RecordLocks;
use crate::db::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductFields};

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No product has the requested ID.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The record store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What happened to an asset the catalog tried to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetCleanup {
    /// No asset needed removing.
    None,
    /// The asset was removed.
    Removed(AssetName),
    /// Removal failed; the file may be left behind.
    Failed(AssetName),
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The image the product now references.
    pub image: Option<AssetName>,
    /// Removal of the image it referenced before, if that changed.
    pub superseded: AssetCleanup,
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Removal of the deleted product's image.
    pub asset: AssetCleanup,
}

/// Coordinates product records with their image assets.
pub struct ProductCatalog<'a, A> {
    products: ProductRepository<'a>,
    assets: &'a A,
    locks: &'a RecordLocks,
}

impl<'a, A: AssetStore> ProductCatalog<'a, A> {
    /// Create a catalog over the given store handles.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, assets: &'a A, locks: &'a RecordLocks) -> Self {
        Self {
            products: ProductRepository::new(pool),
            assets,
            locks,
        }
    }

    /// All products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list().await?)
    }

    /// One product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Create a product, optionally pointing at an already stored upload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the insert fails. The upload is
    /// left in the asset store in that case.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: &ProductFields,
        upload: Option<AssetName>,
    ) -> Result<ProductId, CatalogError> {
        match self.products.create(input, upload.as_ref()).await {
            Ok(id) => {
                info!(product_id = %id, "Created product");
                Ok(id)
            }
            Err(e) => {
                if let Some(orphan) = &upload {
                    warn!(asset = %orphan, error = %e, "Product insert failed; upload is orphaned");
                }
                Err(e.into())
            }
        }
    }

    /// Overwrite a product's fields.
    ///
    /// Without an upload the current image is kept. With one, the product
    /// switches to it and the previous image is removed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist (the
    /// upload, if any, is removed again).
    /// Returns `CatalogError::Repository` if the store fails.
    #[instrument(skip(self, input, id), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductFields,
        upload: Option<AssetName>,
    ) -> Result<UpdateOutcome, CatalogError> {
        let _guard = self.locks.acquire(id).await;

        let existing = match self.products.get(id).await {
            Ok(Some(product)) => product.image,
            Ok(None) => {
                self.discard_upload(upload.as_ref()).await;
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => {
                self.discard_upload(upload.as_ref()).await;
                return Err(e.into());
            }
        };

        let uploaded = upload.is_some();
        let image = resolve_image(upload, existing.clone());
        let superseded = superseded_image(existing.as_ref(), image.as_ref());

        if let Err(e) = self.products.update(id, input, image.as_ref()).await {
            if uploaded {
                self.discard_upload(image.as_ref()).await;
            }
            return Err(match e {
                RepositoryError::NotFound => CatalogError::NotFound(id),
                other => other.into(),
            });
        }

        let superseded = match superseded {
            Some(old) => self.remove_asset(old).await,
            None => AssetCleanup::None,
        };

        info!(image = ?image, "Updated product");
        Ok(UpdateOutcome { image, superseded })
    }

    /// Delete a product and its image.
    ///
    /// The record is deleted even when removing the image fails.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    /// Returns `CatalogError::Repository` if the store fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<DeleteOutcome, CatalogError> {
        let _guard = self.locks.acquire(id).await;

        let product = self.get(id).await?;

        let asset = match product.image {
            Some(image) => self.remove_asset(image).await,
            None => AssetCleanup::None,
        };

        self.products.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::NotFound(id),
            other => other.into(),
        })?;

        info!(asset = ?asset, "Deleted product");
        Ok(DeleteOutcome { asset })
    }

    /// Best-effort removal of an asset no record points at any more.
    async fn remove_asset(&self, name: AssetName) -> AssetCleanup {
        match self.assets.remove(&name).await {
            Ok(()) => AssetCleanup::Removed(name),
            Err(e) => {
                warn!(asset = %name, error = %e, "Failed to remove asset");
                AssetCleanup::Failed(name)
            }
        }
    }

    /// Remove an upload that never became referenced.
    async fn discard_upload(&self, upload: Option<&AssetName>) {
        if let Some(name) = upload {
            self.remove_asset(name.clone()).await;
        }
    }
}
