//! Unified error handling for the catalog admin.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AssetError, CatalogError};

/// Application-level error type for the catalog admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Storing or reading an asset failed.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The submitted form could not be read.
    #[error("Malformed form: {0}")]
    Multipart(#[from] MultipartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => Self::NotFound("Product not found".to_string()),
            CatalogError::Repository(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Asset(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Catalog request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Asset(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Multipart(e) => e.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Asset(_) => {
                "Internal server error".to_string()
            }
            Self::NotFound(what) => what.clone(),
            Self::Multipart(e) => e.body_text(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}
