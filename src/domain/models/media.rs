use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::domain::ports::{HostedImage, HostedVideo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Classify from the declared MIME type of an uploaded part.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// A gallery item. `media_type` decides which URL group is populated:
/// images carry `image_url`/`image_public_id`, videos carry the four
/// video-host fields. `file_path` survives for rows stored locally before
/// hosted uploads existed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Media {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_name: String,
    pub media_type: String,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
    pub video_id: Option<String>,
    pub video_url: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_path: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct SharedMediaMeta {
    pub title: String,
    pub description: Option<String>,
    pub event_name: String,
    pub event_date: Option<NaiveDate>,
}

impl Media {
    pub fn new_image(title: String, meta: &SharedMediaMeta, hosted: HostedImage) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: meta.description.clone(),
            event_name: meta.event_name.clone(),
            media_type: MediaKind::Image.as_str().to_string(),
            image_url: Some(hosted.url),
            image_public_id: Some(hosted.public_id),
            video_id: None,
            video_url: None,
            embed_url: None,
            thumbnail_url: None,
            file_path: None,
            event_date: meta.event_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_video(title: String, meta: &SharedMediaMeta, hosted: HostedVideo) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: meta.description.clone(),
            event_name: meta.event_name.clone(),
            media_type: MediaKind::Video.as_str().to_string(),
            image_url: None,
            image_public_id: None,
            video_id: Some(hosted.video_id),
            video_url: Some(hosted.url),
            embed_url: Some(hosted.embed_url),
            thumbnail_url: Some(hosted.thumbnail_url),
            file_path: None,
            event_date: meta.event_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Suffix a shared title with the file's 1-based position when the batch
/// holds more than one file, so records stay distinguishable in the gallery.
pub fn batch_title(shared: &str, index: usize, batch_size: usize) -> String {
    if batch_size > 1 {
        format!("{} {}", shared, index + 1)
    } else {
        shared.to_string()
    }
}
