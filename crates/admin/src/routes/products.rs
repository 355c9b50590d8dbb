//! Product page and form handlers.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
};
use tracing::instrument;

use shop_catalog_core::{AssetName, ProductId};

use super::form::{ProductForm, Upload};
use crate::{
    error::AppError,
    models::Product,
    services::{AssetCleanup, AssetStore},
    state::AppState,
};

/// URL prefix uploaded images are served under.
pub const UPLOADS_PATH: &str = "/uploads";

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Asset name; templates link it under [`UPLOADS_PATH`].
    pub image: Option<String>,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.as_ref().map(ToString::to_string),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Public product list.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub products: Vec<ProductView>,
}

/// Admin table with edit and delete links.
#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub products: Vec<ProductView>,
}

/// Single product page.
#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ShowTemplate {
    pub product: ProductView,
}

/// Add product form.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct NewTemplate;

/// Edit product form.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct EditTemplate {
    pub product: ProductView,
}

fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

// =============================================================================
// Handlers
// =============================================================================

/// Public product list.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let products = state.catalog().list().await?;

    Ok(render(&IndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
    }))
}

/// Admin product table.
#[instrument(skip_all)]
pub async fn admin(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let products = state.catalog().list().await?;

    Ok(render(&AdminTemplate {
        products: products.iter().map(ProductView::from).collect(),
    }))
}

/// Product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>, AppError> {
    let product = state.catalog().get(id).await?;

    Ok(render(&ShowTemplate {
        product: ProductView::from(&product),
    }))
}

/// Add product form.
#[instrument(skip_all)]
pub async fn new_form() -> Html<String> {
    render(&NewTemplate)
}

/// Create a product from the add form.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = ProductForm::from_multipart(multipart).await?;
    let upload = store_upload(&state, form.image.as_ref()).await?;

    state.catalog().create(&form.fields, upload).await?;

    Ok(Redirect::to("/"))
}

/// Edit product form.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>, AppError> {
    let product = state.catalog().get(id).await?;

    Ok(render(&EditTemplate {
        product: ProductView::from(&product),
    }))
}

/// Update a product from the edit form.
#[instrument(skip(state, multipart))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = ProductForm::from_multipart(multipart).await?;
    let upload = store_upload(&state, form.image.as_ref()).await?;

    let outcome = state.catalog().update(id, &form.fields, upload).await?;
    if let AssetCleanup::Failed(name) = &outcome.superseded {
        tracing::warn!(product_id = %id, asset = %name, "Replaced image left behind");
    }

    Ok(Redirect::to("/admin"))
}

/// Delete a product and its image.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Redirect, AppError> {
    let outcome = state.catalog().delete(id).await?;
    if let AssetCleanup::Failed(name) = &outcome.asset {
        tracing::warn!(product_id = %id, asset = %name, "Deleted product's image left behind");
    }

    Ok(Redirect::to("/admin"))
}

/// Persist an uploaded image, if one was submitted.
async fn store_upload(
    state: &AppState,
    upload: Option<&Upload>,
) -> Result<Option<AssetName>, AppError> {
    match upload {
        Some(upload) => {
            let name = state
                .assets()
                .store(&upload.file_name, &upload.bytes)
                .await?;
            Ok(Some(name))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use shop_catalog_core::Price;

    use super::*;

    fn product(image: Option<&str>) -> Product {
        Product {
            id: ProductId::new(3),
            name: "Mug".to_string(),
            description: "Ceramic mug".to_string(),
            price: Price::parse("12.50").unwrap(),
            image: image.map(|name| AssetName::parse(name).unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_view_with_image() {
        let view = ProductView::from(&product(Some("1700000000000-abcd1234.png")));

        assert_eq!(view.id, 3);
        assert_eq!(view.price, "12.50");
        assert_eq!(view.image.as_deref(), Some("1700000000000-abcd1234.png"));
    }

    #[test]
    fn test_product_view_without_image() {
        let view = ProductView::from(&product(None));
        assert_eq!(view.image, None);
    }

    #[test]
    fn test_templates_render_product_fields() {
        let view = ProductView::from(&product(Some("a.png")));

        let html = ShowTemplate {
            product: view.clone(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Mug"));
        assert!(html.contains("12.50"));
        assert!(html.contains("/uploads/a.png"));

        let html = AdminTemplate {
            products: vec![view],
        }
        .render()
        .unwrap();
        assert!(html.contains("/edit-product/3"));
        assert!(html.contains("/delete-product/3"));
    }

    #[test]
    fn test_templates_escape_html() {
        let mut item = product(None);
        item.name = "<script>".to_string();

        let html = IndexTemplate {
            products: vec![ProductView::from(&item)],
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("script"));
    }
}
