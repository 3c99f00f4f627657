use crate::domain::ports::{HostedImage, ImageHost};
use crate::error::AppError;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::error;

/// Cloudinary-backed image host. Uploads go as signed base64 data URIs;
/// the service accepts SHA-256 request signatures.
pub struct CloudinaryImageHost {
    client: Client,
    cloud_name: Option<String>,
    api_key: String,
    api_secret: String,
}

impl CloudinaryImageHost {
    pub fn new(cloud_name: Option<String>, api_key: String, api_secret: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    fn cloud_name(&self) -> Result<&str, AppError> {
        self.cloud_name
            .as_deref()
            .ok_or_else(|| AppError::Upstream("Image host is not configured".to_string()))
    }

    /// Signs the alphabetically ordered request params with the API secret.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let to_sign: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let mut hasher = Sha256::new();
        hasher.update(to_sign.join("&").as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    fn is_configured(&self) -> bool {
        self.cloud_name.is_some()
    }

    async fn upload(&self, bytes: &[u8], file_name: &str, folder: &str) -> Result<HostedImage, AppError> {
        let cloud_name = self.cloud_name()?;
        let url = format!("https://api.cloudinary.com/v1_1/{}/image/upload", cloud_name);

        let stem = file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name);
        let public_id = format!("{}-{}", Utc::now().timestamp_millis(), stem);
        let timestamp = Utc::now().timestamp().to_string();

        let signature = self.sign(&[
            ("folder", folder),
            ("public_id", &public_id),
            ("timestamp", &timestamp),
        ]);

        let data_uri = format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        );

        let form = [
            ("file", data_uri.as_str()),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("folder", folder),
            ("public_id", &public_id),
            ("signature", &signature),
        ];

        let res = self.client.post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Image host connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Image upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        let uploaded: UploadResponse = res.json().await.map_err(|e| {
            AppError::Upstream(format!("Image host returned malformed response: {}", e))
        })?;

        Ok(HostedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), AppError> {
        let cloud_name = self.cloud_name()?;
        let url = format!("https://api.cloudinary.com/v1_1/{}/image/destroy", cloud_name);

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let form = [
            ("public_id", public_id),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("signature", &signature),
        ];

        let res = self.client.post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Image host connection error: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            return Err(AppError::Upstream(format!(
                "Image delete failed. Status: {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_hex_sha256() {
        let host = CloudinaryImageHost::new(
            Some("demo".to_string()),
            "key".to_string(),
            "secret".to_string(),
        );
        let sig = host.sign(&[("public_id", "abc"), ("timestamp", "1700000000")]);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unconfigured_host() {
        let host = CloudinaryImageHost::new(None, String::new(), String::new());
        assert!(!host.is_configured());
    }
}
