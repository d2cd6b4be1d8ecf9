//! Qiniu object storage upload.
//!
//! Covers are uploaded with a form upload: a signed upload token, the object
//! key and the file bytes posted as `multipart/form-data` to the region's
//! upload endpoint.

mod multipart;
mod token;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::info;
use ureq::Agent;
use wxpub_config::QiniuConfig;

use crate::error::CoverError;
use crate::http::{agent, success_body};
use multipart::MultipartForm;
use token::{TOKEN_TTL_SECS, upload_token};

/// Extension used when the caller gives none.
const DEFAULT_EXTENSION: &str = "jpg";

/// Qiniu form-upload client.
pub struct QiniuUploader {
    agent: Agent,
    access_key: String,
    secret_key: String,
    bucket: String,
    domain: String,
    region: String,
    key_prefix: String,
}

/// Upload API response.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    key: Option<String>,
}

impl QiniuUploader {
    /// Create uploader from the `[qiniu]` config section.
    #[must_use]
    pub fn from_config(config: &QiniuConfig) -> Self {
        Self {
            agent: agent(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
            bucket: config.bucket.clone(),
            domain: config.domain.clone(),
            region: config.region.clone(),
            key_prefix: config.key_prefix.clone(),
        }
    }

    /// Upload image bytes and return their public URL.
    ///
    /// `extension` names the file type, with or without a leading dot.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] on network failure, error status, or a
    /// response without the stored key.
    pub fn upload(&self, data: &[u8], extension: &str) -> Result<String, CoverError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let key = object_key(&self.key_prefix, now.as_millis(), extension);
        let token = upload_token(
            &self.access_key,
            &self.secret_key,
            &self.bucket,
            now.as_secs() + TOKEN_TTL_SECS,
        );

        let (content_type, body) = MultipartForm::new()
            .text("token", &token)
            .text("key", &key)
            .file("file", &key, "application/octet-stream", data)
            .finish();

        let endpoint = upload_endpoint(&self.region);
        info!(
            "Uploading {} bytes to Qiniu bucket '{}' as {}",
            data.len(),
            self.bucket,
            key
        );

        let response = self
            .agent
            .post(endpoint)
            .header("Content-Type", &content_type)
            .send(&body[..])?;

        let response: UploadResponse = success_body(response)?.read_json()?;
        let stored_key = response.key.ok_or(CoverError::MissingField("key"))?;
        let url = public_url(&self.domain, &stored_key);
        info!("Uploaded cover to {}", url);
        Ok(url)
    }

    /// Upload a local image file, taking the extension from its name.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError::Io`] if the file cannot be read, otherwise as [`Self::upload`].
    pub fn upload_file(&self, path: &Path) -> Result<String, CoverError> {
        let data = std::fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_EXTENSION);
        self.upload(&data, extension)
    }
}

/// Form-upload endpoint for a region; unknown regions use East China.
fn upload_endpoint(region: &str) -> &'static str {
    match region {
        "z1" => "https://upload-z1.qiniup.com",
        "z2" => "https://upload-z2.qiniup.com",
        "na0" => "https://upload-na0.qiniup.com",
        "as0" => "https://upload-as0.qiniup.com",
        _ => "https://upload.qiniup.com",
    }
}

/// Object key for an upload at `millis` since the epoch.
fn object_key(prefix: &str, millis: u128, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    let extension = if extension.is_empty() {
        DEFAULT_EXTENSION
    } else {
        extension
    };
    format!("{prefix}{millis}.{extension}")
}

/// Public URL of a stored object under the bucket's domain.
fn public_url(domain: &str, key: &str) -> String {
    let domain = domain.trim_end_matches('/');
    if domain.starts_with("http://") || domain.starts_with("https://") {
        format!("{domain}/{key}")
    } else {
        format!("https://{domain}/{key}")
    }
}
