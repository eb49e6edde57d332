use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::error::StorageError;
use super::key::{ObjectKey, StoredObject};
use super::traits::{ObjectStore, check_size};
use crate::config::{CloudinaryConfig, SignatureAlgorithm};

/// Cloudinary-backed object store.
///
/// PDFs are uploaded as `raw` resources with public access; the key is the
/// Cloudinary public id and the reference is the returned `secure_url`.
pub struct CloudinaryObjectStore {
    http: Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    signature_algorithm: SignatureAlgorithm,
    folder: String,
    max_size: u64,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryObjectStore {
    /// Build a store from account credentials; all three must be present.
    pub fn from_config(
        config: &CloudinaryConfig,
        folder: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| StorageError::Misconfigured(format!("cloudinary {name} is not set")))
        };

        let http = Client::builder()
            .user_agent("pdfshelf/storage")
            .build()
            .map_err(|e| StorageError::Misconfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            cloud_name: required(&config.cloud_name, "cloud_name")?,
            api_key: required(&config.api_key, "api_key")?,
            api_secret: required(&config.api_secret, "api_secret")?,
            signature_algorithm: config.signature_algorithm,
            folder: folder.into(),
            max_size,
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1_1/{}/raw/{action}", self.api_base, self.cloud_name)
    }

    async fn read_error(response: reqwest::Response) -> StorageError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        StorageError::Provider(format!("cloudinary returned {status}: {message}"))
    }
}

/// Sign request parameters the way the Cloudinary upload API expects:
/// sorted `k=v` pairs joined with `&`, suffixed by the secret, hex digest.
pub(crate) fn sign(
    params: &[(&str, &str)],
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let payload = format!("{joined}{api_secret}");
    match algorithm {
        SignatureAlgorithm::Sha1 => hex::encode(Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
    }
}

#[async_trait]
impl ObjectStore for CloudinaryObjectStore {
    async fn put(&self, key: &ObjectKey, data: &[u8]) -> Result<StoredObject, StorageError> {
        check_size(data, self.max_size)?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("access_mode", "public"),
            ("allowed_formats", "pdf"),
            ("public_id", key.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = sign(&signed, &self.api_secret, self.signature_algorithm);

        let filename = key.segments().last().unwrap_or(key.as_str()).to_string();
        let file = Part::bytes(data.to_vec())
            .file_name(filename)
            .mime_str("application/pdf")?;

        let mut form = Form::new().part("file", file);
        for (name, value) in signed {
            form = form.text(name.to_string(), value.to_string());
        }
        let form = form
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        tracing::debug!(key = %key, size = data.len(), "Uploading object to cloudinary");

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: UploadResponse = response.json().await?;
        Ok(StoredObject {
            reference: body.secure_url,
            key: ObjectKey::parse(&body.public_id)?,
        })
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", key.as_str()), ("timestamp", timestamp.as_str())],
            &self.api_secret,
            self.signature_algorithm,
        );

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" => Ok(true),
            "not found" => Ok(false),
            other => Err(StorageError::Provider(format!(
                "cloudinary could not destroy {key}: {other}"
            ))),
        }
    }

    fn folder(&self) -> &str {
        &self.folder
    }

    fn backend_name(&self) -> &'static str {
        "cloudinary"
    }
}
