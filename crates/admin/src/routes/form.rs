//! Multipart product form parsing.

use axum::body::Bytes;
use axum::extract::Multipart;

use shop_catalog_core::Price;

use crate::error::AppError;
use crate::models::ProductFields;

/// An image file submitted with the form.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A submitted add or edit form.
#[derive(Debug)]
pub struct ProductForm {
    pub fields: ProductFields,
    pub image: Option<Upload>,
}

impl ProductForm {
    /// Read the `name`, `description`, `price` and `image` parts.
    ///
    /// Unknown parts are ignored. An `image` part with no file name or no
    /// content means nothing was uploaded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the price is missing or invalid.
    /// Returns `AppError::Multipart` if the body is not valid multipart.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut name = None;
        let mut description = None;
        let mut price = None;
        let mut image = None;

        while let Some(field) = multipart.next_field().await? {
            let part = field.name().map(str::to_owned);
            match part.as_deref() {
                Some("name") => name = Some(field.text().await?),
                Some("description") => description = Some(field.text().await?),
                Some("price") => price = Some(field.text().await?),
                Some("image") => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        image = Some(Upload { file_name, bytes });
                    }
                }
                _ => {}
            }
        }

        let price = price.ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
        let price = Price::parse(&price).map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self {
            fields: ProductFields {
                name: name.unwrap_or_default(),
                description: description.unwrap_or_default(),
                price,
            },
            image,
        })
    }
}
