//! # Menu Service
//!
//! A CRUD service for a restaurant menu catalog, backed by MongoDB, with
//! optional image upload to an external asset-hosting provider.
//!
//! ## Architecture
//!
//! - **Core**: the `MenuItem` model with its default-value rules, the
//!   `MenuStore` storage trait, and the typed error hierarchy
//! - **Storage**: MongoDB implementation with a lazily-established
//!   connection, plus an in-memory implementation for tests and development
//! - **Upload**: `ImageUploader` trait with a Cloudinary-backed adapter
//! - **Server**: Axum handlers, request-body parsing (JSON or multipart),
//!   and the route table
//!
//! Handlers depend only on the `MenuStore` and `ImageUploader` traits, so
//! storage and upload backends can be swapped without touching route logic.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use menu_service::prelude::*;
//!
//! let state = AppState {
//!     store: Arc::new(InMemoryMenuStore::new()),
//!     uploader: Arc::new(CloudinaryUploader::new(None)?),
//! };
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod upload;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::{
        error::{ErrorResponse, MenuError},
        menu::{MenuItem, MenuPatch, MenuPayload},
        service::MenuStore,
    };
    pub use crate::server::{handlers::AppState, router::build_router};
    pub use crate::storage::{InMemoryMenuStore, MongoConnection, MongoMenuStore};
    pub use crate::upload::{CloudinaryCredentials, CloudinaryUploader, ImageUploader};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
