use axum::{extract::{Multipart, Query, State}, response::IntoResponse, Json, http::StatusCode};
use axum::body::Bytes;
use crate::state::AppState;
use crate::api::dtos::requests::{MediaListQuery, VideoAuthCallbackQuery};
use crate::api::dtos::responses::{FileUploadResult, MessageResponse, UploadBatchResponse, VideoAuthUrlResponse};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::media::{batch_title, Media, MediaKind, SharedMediaMeta};
use crate::error::AppError;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};

const MAX_BATCH_SIZE: usize = 10;
const IMAGE_FOLDER: &str = "temple-media/images";

struct IncomingFile {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut title = None;
    let mut description = None;
    let mut event_name = None;
    let mut event_date = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field, "title").await?),
            "description" => description = Some(read_text(field, "description").await?),
            "event_name" => event_name = Some(read_text(field, "event_name").await?),
            "event_date" => {
                let raw = read_text(field, "event_date").await?;
                event_date = Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid date format".into()))?);
            }
            "files" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await
                    .map_err(|e| AppError::Validation(format!("Failed to read file {file_name}: {e}")))?;
                files.push(IncomingFile { file_name, content_type, bytes });
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    let title = match title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            missing.push("title".to_string());
            String::new()
        }
    };
    let event_name = match event_name.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e.to_string(),
        _ => {
            missing.push("event_name".to_string());
            String::new()
        }
    };
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    if files.is_empty() {
        return Err(AppError::Validation("At least one file is required".into()));
    }
    if files.len() > MAX_BATCH_SIZE {
        return Err(AppError::Validation(format!(
            "A maximum of {MAX_BATCH_SIZE} files can be uploaded at once"
        )));
    }

    let meta = SharedMediaMeta { title, description, event_name, event_date };
    let batch_size = files.len();
    let mut results = Vec::with_capacity(batch_size);

    for (index, file) in files.into_iter().enumerate() {
        let file_name = file.file_name.clone();
        match store_file(&state, &meta, index, batch_size, file).await {
            Ok(media) => {
                info!("Media stored: {} ({})", media.id, file_name);
                results.push(FileUploadResult { file_name, media: Some(media), error: None });
            }
            Err(e) => {
                warn!("Upload failed for {}: {}", file_name, e);
                results.push(FileUploadResult { file_name, media: None, error: Some(e.to_string()) });
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadBatchResponse {
            message: "Upload processed".to_string(),
            results,
        }),
    ))
}

/// One file end to end. Failures here fail this file only, never the batch.
async fn store_file(
    state: &AppState,
    meta: &SharedMediaMeta,
    index: usize,
    batch_size: usize,
    file: IncomingFile,
) -> Result<Media, AppError> {
    let kind = MediaKind::from_mime(&file.content_type)
        .ok_or_else(|| AppError::Validation(format!("Unsupported file type: {}", file.content_type)))?;

    let title = batch_title(&meta.title, index, batch_size);

    let media = match kind {
        MediaKind::Image => {
            let hosted = state.image_host
                .upload(&file.bytes, &file.file_name, IMAGE_FOLDER)
                .await?;
            Media::new_image(title, meta, hosted)
        }
        MediaKind::Video => {
            let staged = state.uploads.stage(&file.file_name, &file.bytes).await?;
            let description = meta.description.clone()
                .unwrap_or_else(|| format!("Video from {} temple event", meta.event_name));
            let hosted = state.video_host
                .upload(staged.path(), &title, &description)
                .await?;
            Media::new_video(title, meta, hosted)
        }
    };

    state.media_repo.create(&media).await
}

pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MediaListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.media_repo.list(query.event_name.as_deref()).await?;
    Ok(Json(items))
}

pub async fn video_auth_url(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let auth_url = state.video_host.authorize_url()?;
    Ok(Json(VideoAuthUrlResponse { auth_url }))
}

pub async fn video_auth_callback(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<VideoAuthCallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let code = query.code
        .ok_or(AppError::Validation("Authorization code is required".into()))?;

    state.video_host.exchange_code(&code).await?;
    info!("Video host authorization completed");

    Ok(Json(MessageResponse {
        message: "Video hosting authorized successfully".to_string(),
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field.text().await
        .map_err(|e| AppError::Validation(format!("Invalid value for {name}: {e}")))
}
