//! Integration test support for the product catalog.
//!
//! Each [`TestContext`] serves the full application on an ephemeral port,
//! backed by an in-memory database and a temporary public directory, so
//! tests need no running services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-catalog-integration-tests
//! ```

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, redirect};
use tempfile::TempDir;
use tokio::net::TcpListener;

use shop_catalog_admin::config::AdminConfig;
use shop_catalog_admin::db;
use shop_catalog_admin::state::AppState;

/// A running catalog server plus handles for inspecting its stores.
pub struct TestContext {
    /// Client that does not follow redirects.
    pub client: Client,
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// State shared with the server.
    pub state: AppState,
    _public: TempDir,
}

impl TestContext {
    /// Start a fresh server.
    ///
    /// # Panics
    ///
    /// Panics if the database, directory or listener cannot be set up.
    pub async fn new() -> Self {
        let public = tempfile::tempdir().expect("Failed to create public dir");
        let config = AdminConfig::local("sqlite::memory:", public.path());

        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create database pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, pool);
        let app = shop_catalog_admin::app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            state,
            _public: public,
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Directory uploaded images are written to.
    #[must_use]
    pub fn uploads_dir(&self) -> &Path {
        &self.state.config().uploads_dir
    }

    /// File names currently in the uploads directory, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the directory exists but cannot be read.
    pub async fn uploaded_files(&self) -> Vec<String> {
        let mut names = Vec::new();
        let Ok(mut entries) = tokio::fs::read_dir(self.uploads_dir()).await else {
            return names;
        };
        while let Some(entry) = entries.next_entry().await.expect("Failed to read uploads") {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        names
    }
}

/// Build an add/edit product form.
///
/// `image` is `(file name, bytes)`; pass `None` to submit no file part.
#[must_use]
pub fn product_form(
    name: &str,
    description: &str,
    price: &str,
    image: Option<(&str, &[u8])>,
) -> Form {
    let form = Form::new()
        .text("name", name.to_string())
        .text("description", description.to_string())
        .text("price", price.to_string());

    match image {
        Some((file_name, bytes)) => form.part(
            "image",
            Part::bytes(bytes.to_vec()).file_name(file_name.to_string()),
        ),
        None => form,
    }
}
