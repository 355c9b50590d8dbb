//! Integration tests for the product lifecycle over HTTP.
//!
//! Each test starts its own server with an in-memory database and a
//! temporary uploads directory.
//!
//! Run with: cargo test -p shop-catalog-integration-tests

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use reqwest::multipart::{Form, Part};

use shop_catalog_core::{AssetName, ProductId};
use shop_catalog_integration_tests::{TestContext, product_form};

/// Submit the add form and return the redirect location.
async fn add_product(ctx: &TestContext, form: Form) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/add-product"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    resp.headers()[LOCATION].to_str().unwrap().to_string()
}

/// Image currently recorded for a product.
async fn stored_image(ctx: &TestContext, id: i64) -> Option<AssetName> {
    ctx.state
        .catalog()
        .get(ProductId::new(id))
        .await
        .unwrap()
        .image
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_without_image() {
    let ctx = TestContext::new().await;

    let location = add_product(&ctx, product_form("Plate", "Flat", "4.00", None)).await;
    assert_eq!(location, "/");

    assert_eq!(stored_image(&ctx, 1).await, None);
    assert!(ctx.uploaded_files().await.is_empty());

    let body = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Plate"));
    assert!(body.contains("4.00"));
}

#[tokio::test]
async fn test_create_with_image_serves_upload() {
    let ctx = TestContext::new().await;

    add_product(
        &ctx,
        product_form("Mug", "Ceramic mug", "9.99", Some(("mug.png", b"png-bytes"))),
    )
    .await;

    let image = stored_image(&ctx, 1).await.unwrap();
    assert!(image.as_str().ends_with(".png"));
    assert_eq!(ctx.uploaded_files().await, [image.to_string()]);

    let page = ctx
        .client
        .get(ctx.url("/product/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let body = page.text().await.unwrap();
    assert!(body.contains("Ceramic mug"));
    assert!(body.contains(&format!("/uploads/{image}")));

    let file = ctx
        .client
        .get(ctx.url(&format!("/uploads/{image}")))
        .send()
        .await
        .unwrap();
    assert_eq!(file.status(), StatusCode::OK);
    assert_eq!(file.bytes().await.unwrap().as_ref(), b"png-bytes");
}

#[tokio::test]
async fn test_empty_file_part_counts_as_no_upload() {
    let ctx = TestContext::new().await;

    let form = product_form("Bowl", "", "3", None)
        .part("image", Part::bytes(Vec::new()).file_name(String::new()));
    add_product(&ctx, form).await;

    assert_eq!(stored_image(&ctx, 1).await, None);
    assert!(ctx.uploaded_files().await.is_empty());
}

#[tokio::test]
async fn test_invalid_price_is_rejected_before_storing() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/add-product"))
        .multipart(product_form("Mug", "", "cheap", Some(("mug.png", b"x"))))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.uploaded_files().await.is_empty());
    assert!(ctx.state.catalog().list().await.unwrap().is_empty());
}

// ============================================================================
// View
// ============================================================================

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/product/42")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text().await.unwrap(), "Product not found");

    let resp = ctx
        .client
        .get(ctx.url("/edit-product/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/product/mug"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_without_upload_keeps_image() {
    let ctx = TestContext::new().await;
    add_product(
        &ctx,
        product_form("Mug", "Ceramic mug", "9.99", Some(("a.png", b"a"))),
    )
    .await;
    let original = stored_image(&ctx, 1).await.unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/edit-product/1"))
        .multipart(product_form("Mug", "Ceramic mug", "12.50", None))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/admin");

    let product = ctx.state.catalog().get(ProductId::new(1)).await.unwrap();
    assert_eq!(product.image, Some(original.clone()));
    assert_eq!(product.price.to_string(), "12.50");
    assert_eq!(ctx.uploaded_files().await, [original.to_string()]);
}

#[tokio::test]
async fn test_update_with_upload_replaces_image_file() {
    let ctx = TestContext::new().await;
    add_product(&ctx, product_form("Mug", "", "9.99", Some(("a.png", b"a")))).await;
    let original = stored_image(&ctx, 1).await.unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/edit-product/1"))
        .multipart(product_form("Mug", "", "9.99", Some(("b.jpg", b"b"))))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let replacement = stored_image(&ctx, 1).await.unwrap();
    assert_ne!(replacement, original);
    assert!(replacement.as_str().ends_with(".jpg"));
    assert_eq!(ctx.uploaded_files().await, [replacement.to_string()]);
}

#[tokio::test]
async fn test_update_missing_product_leaves_no_upload() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/edit-product/9"))
        .multipart(product_form("Ghost", "", "1", Some(("g.png", b"g"))))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(ctx.uploaded_files().await.is_empty());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_removes_record_and_image() {
    let ctx = TestContext::new().await;
    add_product(&ctx, product_form("Mug", "", "1", Some(("a.png", b"a")))).await;
    assert_eq!(ctx.uploaded_files().await.len(), 1);

    let resp = ctx
        .client
        .post(ctx.url("/delete-product/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/admin");

    assert!(ctx.uploaded_files().await.is_empty());
    let resp = ctx.client.get(ctx.url("/product/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_link_without_image() {
    let ctx = TestContext::new().await;
    add_product(&ctx, product_form("Plate", "", "1", None)).await;

    let resp = ctx
        .client
        .get(ctx.url("/delete-product/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    assert!(ctx.state.catalog().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_product_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/delete-product/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_admin_lists_every_product() {
    let ctx = TestContext::new().await;
    for name in ["Cup", "Bowl", "Jug"] {
        add_product(&ctx, product_form(name, "", "2.00", None)).await;
    }

    let body = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    for id in 1..=3 {
        assert!(body.contains(&format!("/edit-product/{id}")));
    }
    let positions: Vec<_> = ["Cup", "Bowl", "Jug"]
        .iter()
        .map(|name| body.find(name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
