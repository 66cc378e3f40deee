//! External image CDN upload client.
//!
//! Uploads are a multipart form POST (the file plus an unsigned preset
//! field) against the configured endpoint; the CDN answers with a JSON body
//! whose `secure_url` becomes the entity's stored image field. The client
//! carries an explicit request timeout so a stalled upload fails instead of
//! hanging the save that triggered it.

use crate::{
    config::app::CdnConfig,
    errors::{Error, Result},
};
use serde::Deserialize;
use tracing::info;

/// Client for the image-hosting CDN.
#[derive(Debug, Clone)]
pub struct ImageUploader {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageUploader {
    /// Builds an uploader from CDN settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CdnConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    /// Uploads image bytes and returns the HTTPS URL the CDN assigned.
    ///
    /// # Errors
    /// Returns a validation error for an empty payload, an upload error
    /// carrying the CDN's status and body for non-success responses, and a
    /// transport error for network failures or a hit timeout.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::Validation {
                message: "Cannot upload an empty image".to_string(),
            });
        }

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upload {
                message: format!("CDN returned {status}: {body}"),
            });
        }

        let body: UploadResponse = response.json().await?;
        info!(url = %body.secure_url, "uploaded image {file_name}");
        Ok(body.secure_url)
    }
}
