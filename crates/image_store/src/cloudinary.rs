use std::collections::HashMap;
use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::filter::is_allowed_image_file;
use crate::types::{ImageStoreError, ImageUpload, StoredImage};

/// Trait for image storage providers
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an image payload, returning its URL and deletion reference
    async fn upload(&self, image: &ImageUpload) -> Result<StoredImage, ImageStoreError>;

    /// Delete a stored image by reference. Deleting a reference that no
    /// longer exists is not an error.
    async fn delete(&self, public_id: &str) -> Result<(), ImageStoreError>;
}

/// Configuration for the Cloudinary storage client
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// Cloud name the account lives under
    pub cloud_name: String,

    /// API key for the Admin API
    pub api_key: String,

    /// API secret for the Admin API
    pub api_secret: String,

    /// Unsigned upload preset applied to uploads
    pub upload_preset: String,

    /// Base URL for the Cloudinary API (default: https://api.cloudinary.com)
    pub base_url: String,

    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl CloudinaryConfig {
    /// Build a configuration from the `CLOUDINARY_*` environment variables
    pub fn from_env() -> Result<Self, ImageStoreError> {
        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME").map_err(|_| {
            ImageStoreError::Config(
                "CLOUDINARY_CLOUD_NAME environment variable not set".to_string(),
            )
        })?;

        let api_key = env::var("CLOUDINARY_API_KEY").map_err(|_| {
            ImageStoreError::Config("CLOUDINARY_API_KEY environment variable not set".to_string())
        })?;

        let api_secret = env::var("CLOUDINARY_API_SECRET").map_err(|_| {
            ImageStoreError::Config(
                "CLOUDINARY_API_SECRET environment variable not set".to_string(),
            )
        })?;

        let upload_preset = env::var("CLOUDINARY_UPLOAD_PRESET").map_err(|_| {
            ImageStoreError::Config(
                "CLOUDINARY_UPLOAD_PRESET environment variable not set".to_string(),
            )
        })?;

        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
            upload_preset,
            base_url: "https://api.cloudinary.com".to_string(),
            timeout: Duration::from_secs(30),
        })
    }
}

/// Client for the Cloudinary image API
pub struct CloudinaryStore {
    client: Client,
    config: CloudinaryConfig,
}

/// Response structure from the Cloudinary upload API
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Response structure from the Cloudinary Admin API deletion endpoint
#[derive(Debug, Deserialize)]
struct DeleteResponse {
    deleted: HashMap<String, String>,
}

impl CloudinaryStore {
    /// Create a new Cloudinary client
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageStoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ImageStoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Interpret a deletion outcome for a single reference.
    ///
    /// Cloudinary reports `not_found` for references that no longer
    /// exist; deletion is idempotent, so that counts as success.
    fn delete_outcome(public_id: &str, response: &DeleteResponse) -> Result<(), ImageStoreError> {
        match response.deleted.get(public_id).map(String::as_str) {
            Some("deleted") | Some("not_found") => Ok(()),
            Some(other) => Err(ImageStoreError::Delete(format!(
                "unexpected result for {}: {}",
                public_id, other
            ))),
            None => Err(ImageStoreError::Delete(format!(
                "no result reported for {}",
                public_id
            ))),
        }
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, image: &ImageUpload) -> Result<StoredImage, ImageStoreError> {
        if !is_allowed_image_file(&image.filename) {
            return Err(ImageStoreError::InvalidFileType(image.filename.clone()));
        }

        debug!(
            "Uploading image {} ({} bytes)",
            image.filename,
            image.bytes.len()
        );

        let url = format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url, self.config.cloud_name
        );

        let part = Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        let form = Form::new()
            .text("upload_preset", self.config.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageStoreError::Upload(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Image upload failed with status {}: {}", status, body);
            return Err(ImageStoreError::Upload(format!("HTTP {} - {}", status, body)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageStoreError::Upload(format!("Failed to parse response: {}", e)))?;

        info!("Uploaded image {} as {}", image.filename, uploaded.public_id);

        Ok(StoredImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), ImageStoreError> {
        debug!("Deleting stored image {}", public_id);

        let url = format!(
            "{}/v1_1/{}/resources/image/upload",
            self.config.base_url, self.config.cloud_name
        );

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[("public_ids[]", public_id)])
            .send()
            .await
            .map_err(|e| ImageStoreError::Delete(format!("HTTP request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // Reference already gone; deletion is idempotent.
            return Ok(());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Image deletion failed with status {}: {}", status, body);
            return Err(ImageStoreError::Delete(format!("HTTP {} - {}", status, body)));
        }

        let outcome: DeleteResponse = response
            .json()
            .await
            .map_err(|e| ImageStoreError::Delete(format!("Failed to parse response: {}", e)))?;

        Self::delete_outcome(public_id, &outcome)
    }
}
