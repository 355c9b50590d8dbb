//! Database operations for products.
//!
//! Queries are bound at runtime (`query`/`query_as`), so building the crate
//! never needs a live database.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shop_catalog_core::{AssetName, Price, ProductId};

use super::RepositoryError;
use crate::models::{Product, ProductFields};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::parse(&row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;
        let image = row
            .image
            .as_deref()
            .map(AssetName::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid image name for product {}: {e}",
                    row.id
                ))
            })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new product and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        fields: &ProductFields,
        image: Option<&AssetName>,
    ) -> Result<ProductId, RepositoryError> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (name, description, price, image, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price.to_string())
        .bind(image.map(AssetName::as_str))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get a product by ID.
    ///
    /// Returns `Ok(None)` when no product has this ID, keeping "not found"
    /// apart from store failures.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image, created_at, updated_at
            FROM products
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// List all products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image, created_at, updated_at
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Overwrite every mutable field of a product, including its image.
    ///
    /// Callers decide the final image beforehand; passing `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        fields: &ProductFields,
        image: Option<&AssetName>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = ?, description = ?, price = ?, image = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price.to_string())
        .bind(image.map(AssetName::as_str))
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Every asset name currently referenced by a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored name is invalid.
    pub async fn list_image_names(&self) -> Result<Vec<AssetName>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT image FROM products WHERE image IS NOT NULL ORDER BY image",
        )
        .fetch_all(self.pool)
        .await?;

        names
            .iter()
            .map(|name| {
                AssetName::parse(name).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid image name {name:?}: {e}"))
                })
            })
            .collect()
    }
}
