//! Cloudinary-backed image uploader
//!
//! Performs a signed upload: the request carries the API key, a unix
//! timestamp, and a SHA-1 signature over the timestamp and the API
//! secret. On success Cloudinary answers with a permanent `secure_url`.
//!
//! The HTTP client carries a request-level timeout so a hung provider
//! surfaces as an upload failure instead of blocking the request forever.

use crate::upload::ImageUploader;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;

/// Upper bound on a single upload round trip.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials for the image-hosting provider, supplied via environment
/// configuration.
#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    /// Account name ("cloud name" in Cloudinary terms)
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Image uploader backed by the Cloudinary upload API.
///
/// Credentials are optional: when absent, every upload fails with a
/// configuration error while the rest of the service keeps working.
#[derive(Clone)]
pub struct CloudinaryUploader {
    credentials: Option<CloudinaryCredentials>,
    client: reqwest::Client,
}

impl CloudinaryUploader {
    /// Create a new uploader with its own timed-out HTTP client.
    pub fn new(credentials: Option<CloudinaryCredentials>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to build upload HTTP client: {}", e))?;

        Ok(Self {
            credentials,
            client,
        })
    }

    /// Compute the Cloudinary request signature: SHA-1 hex digest of the
    /// signed parameters followed by the API secret.
    fn sign(timestamp: i64, api_secret: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(format!("timestamp={timestamp}{api_secret}").as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// The subset of the provider response the service needs.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| anyhow!("Image provider credentials are not configured"))?;

        let timestamp = Utc::now().timestamp();
        let signature = Self::sign(timestamp, &credentials.api_secret);

        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", credentials.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            credentials.cloud_name
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Upload request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Upload provider returned {}: {}", status, body);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse upload response: {}", e))?;

        tracing::info!(url = %body.secure_url, "image uploaded");

        Ok(body.secure_url)
    }
}
