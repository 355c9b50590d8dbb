//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Database readiness check
//!
//! # Storefront
//! GET  /                         - Product list
//! GET  /product/{id}             - Product detail
//!
//! # Admin
//! GET  /admin                    - Product table with edit/delete links
//! GET  /add-product              - Add form
//! POST /add-product              - Create (multipart), redirects to /
//! GET  /edit-product/{id}        - Edit form
//! POST /edit-product/{id}        - Update (multipart), redirects to /admin
//! GET  /delete-product/{id}      - Delete, redirects to /admin
//! POST /delete-product/{id}      - Delete, redirects to /admin
//! ```

pub mod form;
pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the catalog router (without static file services).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(products::index))
        .route("/admin", get(products::admin))
        .route("/product/{id}", get(products::show))
        .route(
            "/add-product",
            get(products::new_form).post(products::create),
        )
        .route(
            "/edit-product/{id}",
            get(products::edit_form).post(products::update),
        )
        .route(
            "/delete-product/{id}",
            get(products::delete).post(products::delete),
        )
}
