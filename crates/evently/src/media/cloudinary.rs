//! Signed uploads to Cloudinary.
//!
//! Uploads are sent as multipart `POST {api_base}/v1_1/{cloud}/{resource}/upload`
//! requests. Every parameter except `file`, `api_key` and the signature
//! itself is signed over `k1=v1&k2=v2...` (keys sorted) followed by the API
//! secret, with the digest the account is configured for (SHA-1 by default).
//! The digest is not sent with the request.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use evently_core::media::{MediaError, MediaUploader, Result, UploadRequest, UploadedMedia};

use crate::config::{CloudinaryCredentials, Config, SignatureAlgorithm};

/// Cloudinary upload client.
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    api_base: String,
    credentials: Option<CloudinaryCredentials>,
    signature_algorithm: SignatureAlgorithm,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryUploader {
    /// Creates an uploader. Missing credentials are reported on the first upload.
    pub fn new(api_base: impl Into<String>, credentials: Option<CloudinaryCredentials>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            credentials,
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cloudinary_api_base.clone(), config.cloudinary.clone())
            .with_signature_algorithm(config.cloudinary_signature_algorithm)
    }

    fn upload_url(&self, cloud_name: &str, resource_type: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.api_base.trim_end_matches('/'),
            cloud_name,
            resource_type
        )
    }
}

/// Computes the hex signature for a set of upload parameters.
pub fn sign_params(
    params: &BTreeMap<&'static str, String>,
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&to_sign, api_secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&to_sign, api_secret),
    }
}

fn hex_digest<D: Digest>(to_sign: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            MediaError::NotConfigured(
                "set CLOUDINARY_URL or CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and \
                 CLOUDINARY_API_SECRET"
                    .to_string(),
            )
        })?;

        let url = self.upload_url(&credentials.cloud_name, request.resource_type.as_str());

        let mut params = BTreeMap::new();
        params.insert("folder", request.folder.clone());
        params.insert("timestamp", Utc::now().timestamp().to_string());
        let signature = sign_params(&params, &credentials.api_secret, self.signature_algorithm);

        tracing::debug!(
            folder = %request.folder,
            algorithm = self.signature_algorithm.as_str(),
            bytes = request.bytes.len(),
            content_type = ?request.content_type,
            "Uploading media to Cloudinary"
        );

        let file_name = request
            .file_name
            .clone()
            .unwrap_or_else(|| "upload".to_string());
        let mut form = Form::new()
            .part("file", Part::bytes(request.bytes).file_name(file_name))
            .text("api_key", credentials.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::info!(public_id = %uploaded.public_id, "Media uploaded");

        Ok(UploadedMedia {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}
