//! Product catalog admin library.
//!
//! Keeps product records (`SQLite`) and their uploaded images (files on
//! disk) consistent across create, update and delete, and serves the
//! catalog pages. Exposed as a library so the CLI and integration tests can
//! reuse the record store, asset store and router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;

use routes::products::UPLOADS_PATH;
use state::AppState;

/// Build the full application: catalog routes, uploaded images, static
/// files and the request body limit.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let uploads = ServeDir::new(&config.uploads_dir);
    let statics = ServeDir::new(&config.static_dir);
    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);

    Router::new()
        .merge(routes::routes())
        .nest_service(UPLOADS_PATH, uploads)
        .nest_service("/static", statics)
        .layer(body_limit)
        .with_state(state)
}
