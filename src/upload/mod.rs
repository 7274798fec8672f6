//! Image upload adapter
//!
//! Abstracts the external image-hosting provider behind the
//! [`ImageUploader`] trait so handlers and tests are independent of the
//! concrete provider.

pub mod cloudinary;

pub use cloudinary::{CloudinaryCredentials, CloudinaryUploader};

use anyhow::Result;
use async_trait::async_trait;

/// Service trait for pushing image bytes to external storage
///
/// `upload` accepts a raw image byte buffer and returns a stable,
/// permanent URL. On provider-side failure the call fails with an error
/// the caller must propagate as a request failure; an upload failure is
/// never silently ignored.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload the image bytes and return the hosted URL
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String>;
}
