//! Product domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_catalog_core::{AssetName, Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// System-assigned identifier, immutable once created.
    pub id: ProductId,
    /// Free-text label (not unique).
    pub name: String,
    /// Free-text detail, may be empty.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Uploaded image in the asset store, if any.
    pub image: Option<AssetName>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last written.
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of a product.
///
/// Create and update both overwrite exactly these fields; the image is
/// handled separately because it follows its own keep-or-replace rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductFields {
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Product price.
    pub price: Price,
}
