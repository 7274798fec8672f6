//! Typed error handling for the menu service
//!
//! Each variant maps to a fixed HTTP status and a stable error code so
//! the front-end can handle failures programmatically:
//!
//! - [`MenuError::Validation`] → 400, a client fault (never logged as a
//!   server error)
//! - [`MenuError::NotFound`] → 404
//! - [`MenuError::Storage`] and [`MenuError::Upload`] → 500, logged
//!   server-side with the underlying fault

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The error type for all menu operations
#[derive(Debug, Error)]
pub enum MenuError {
    /// Client sent an invalid request (missing required field, malformed id)
    #[error("{message}")]
    Validation { message: String },

    /// No menu item matches the given id
    #[error("Menu tidak ditemukan")]
    NotFound { id: Uuid },

    /// The document store failed or is unreachable
    #[error("{message}")]
    Storage { message: String },

    /// The image-hosting provider rejected or failed the upload
    #[error("{message}")]
    Upload { message: String },
}

impl MenuError {
    /// Build a validation error with a human-readable message.
    pub fn validation(message: impl Into<String>) -> Self {
        MenuError::Validation {
            message: message.into(),
        }
    }

    /// Wrap an underlying storage fault.
    pub fn storage(err: anyhow::Error) -> Self {
        MenuError::Storage {
            message: err.to_string(),
        }
    }

    /// Wrap an underlying upload fault.
    pub fn upload(err: anyhow::Error) -> Self {
        MenuError::Upload {
            message: err.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MenuError::Validation { .. } => StatusCode::BAD_REQUEST,
            MenuError::NotFound { .. } => StatusCode::NOT_FOUND,
            MenuError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            MenuError::Upload { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MenuError::Validation { .. } => "VALIDATION_ERROR",
            MenuError::NotFound { .. } => "MENU_NOT_FOUND",
            MenuError::Storage { .. } => "STORAGE_ERROR",
            MenuError::Upload { .. } => "UPLOAD_ERROR",
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for MenuError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream failures are server faults; client errors are not.
        match &self {
            MenuError::Storage { message } => {
                tracing::error!(error = %message, "storage operation failed");
            }
            MenuError::Upload { message } => {
                tracing::error!(error = %message, "image upload failed");
            }
            _ => {}
        }

        let body = Json(ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
