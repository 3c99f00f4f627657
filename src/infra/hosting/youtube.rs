use crate::domain::models::credential::{Credential, PROVIDER_YOUTUBE};
use crate::domain::ports::{CredentialRepository, HostedVideo, VideoHost};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";
const SCOPES: &str =
    "https://www.googleapis.com/auth/youtube.upload https://www.googleapis.com/auth/youtube";

/// YouTube-backed video host. OAuth tokens live in the credentials table,
/// not process state, so authorization survives restarts.
pub struct YouTubeVideoHost {
    client: Client,
    credentials: Arc<dyn CredentialRepository>,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl YouTubeVideoHost {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_else(|_| Client::new()),
            credentials,
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    fn require_configured(&self) -> Result<(), AppError> {
        if self.client_id.is_empty() {
            return Err(AppError::Upstream("Video host is not configured".to_string()));
        }
        Ok(())
    }

    async fn request_tokens(&self, params: &[(&str, &str)]) -> Result<TokenResponse, AppError> {
        let res = self.client.post(TOKEN_URL)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Video host token endpoint error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Video host token exchange failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        res.json().await.map_err(|e| {
            AppError::Upstream(format!("Video host returned malformed token response: {}", e))
        })
    }

    /// Returns a usable access token, refreshing and re-persisting it when
    /// the stored one has expired.
    async fn current_access_token(&self) -> Result<String, AppError> {
        let stored = self.credentials.get(PROVIDER_YOUTUBE).await?.ok_or_else(|| {
            AppError::Upstream(
                "Video host is not authorized; complete the video-auth flow first".to_string(),
            )
        })?;

        if stored.is_expired(Utc::now())
            && let Some(refresh_token) = stored.refresh_token.clone()
        {
            info!("Refreshing expired video host access token");
            let tokens = self.request_tokens(&[
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("refresh_token", &refresh_token),
                ("grant_type", "refresh_token"),
            ]).await?;

            let refreshed = Credential::new(
                PROVIDER_YOUTUBE,
                tokens.access_token.clone(),
                tokens.refresh_token.or(Some(refresh_token)),
                tokens.expires_in.map(|s| Utc::now() + ChronoDuration::seconds(s)),
            );
            self.credentials.upsert(&refreshed).await?;
            return Ok(tokens.access_token);
        }

        Ok(stored.access_token)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct UploadedVideo {
    id: String,
}

#[async_trait]
impl VideoHost for YouTubeVideoHost {
    fn authorize_url(&self) -> Result<String, AppError> {
        self.require_configured()?;

        let url = reqwest::Url::parse_with_params(AUTH_URL, &[
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ])
        .map_err(|e| {
            error!("Failed to build authorize URL: {}", e);
            AppError::Internal
        })?;

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<(), AppError> {
        self.require_configured()?;

        let tokens = self.request_tokens(&[
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
            ("grant_type", "authorization_code"),
        ]).await?;

        let credential = Credential::new(
            PROVIDER_YOUTUBE,
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in.map(|s| Utc::now() + ChronoDuration::seconds(s)),
        );
        self.credentials.upsert(&credential).await?;
        info!("Video host authorization stored");
        Ok(())
    }

    async fn upload(&self, file_path: &Path, title: &str, description: &str) -> Result<HostedVideo, AppError> {
        self.require_configured()?;
        let access_token = self.current_access_token().await?;

        let metadata = json!({
            "snippet": {
                "title": title,
                "description": description,
                "tags": ["temple", "event"],
                "categoryId": "22",
            },
            "status": {
                "privacyStatus": "unlisted",
            },
        });

        // Resumable upload: register the metadata, then send the bytes to
        // the session URL the host hands back.
        let init = self.client.post(UPLOAD_URL)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(&access_token)
            .json(&metadata)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Video host connection error: {}", e)))?;

        if !init.status().is_success() {
            let status = init.status();
            let text = init.text().await.unwrap_or_default();
            let msg = format!("Video upload init failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        let session_url = init.headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Upstream("Video host did not return an upload session".to_string())
            })?;

        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            error!("Failed to read staged video {}: {}", file_path.display(), e);
            AppError::Internal
        })?;

        let res = self.client.put(&session_url)
            .bearer_auth(&access_token)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Video upload error: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Video upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        let uploaded: UploadedVideo = res.json().await.map_err(|e| {
            AppError::Upstream(format!("Video host returned malformed response: {}", e))
        })?;

        Ok(HostedVideo {
            url: format!("https://www.youtube.com/watch?v={}", uploaded.id),
            embed_url: format!("https://www.youtube.com/embed/{}", uploaded.id),
            thumbnail_url: format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", uploaded.id),
            video_id: uploaded.id,
        })
    }
}
