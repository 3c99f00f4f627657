use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DEFAULT_QR_TITLE: &str = "Temple Donation";
pub const DEFAULT_QR_DESCRIPTION: &str = "Scan this QR code to make a donation to the temple";
pub const DEFAULT_QR_EVENT: &str = "General Donation";
pub const DEFAULT_QR_AMOUNT: &str = "Any Amount";
pub const DEFAULT_QR_IMAGE: &str = "/uploads/default-qr.png";

/// Donation QR code shown on the public site. At most one row is active
/// at a time; the repository enforces that whenever a write activates one.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct QrCode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub qr_image_url: String,
    pub qr_code: Option<String>,
    pub is_active: bool,
    pub event_name: String,
    pub amount: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewQrCodeParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub qr_image_url: String,
    pub qr_code: Option<String>,
    pub event_name: Option<String>,
    pub amount: Option<String>,
    pub created_by: String,
}

impl QrCode {
    /// Omitted text fields fall back to the general-donation defaults.
    pub fn new(params: NewQrCodeParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title.unwrap_or_else(|| DEFAULT_QR_TITLE.to_string()),
            description: params
                .description
                .unwrap_or_else(|| DEFAULT_QR_DESCRIPTION.to_string()),
            qr_image_url: params.qr_image_url,
            qr_code: params.qr_code,
            is_active: true,
            event_name: params
                .event_name
                .unwrap_or_else(|| DEFAULT_QR_EVENT.to_string()),
            amount: params.amount.unwrap_or_else(|| DEFAULT_QR_AMOUNT.to_string()),
            created_by: params.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hosted image public id, derived from the URL the way the host
    /// assigns them (`temple/qr-codes/<file stem>`). None for local files.
    pub fn hosted_image_public_id(&self) -> Option<String> {
        if !self.qr_image_url.contains("cloudinary") {
            return None;
        }
        let stem = self
            .qr_image_url
            .rsplit('/')
            .next()?
            .split('.')
            .next()?
            .to_string();
        if stem.is_empty() {
            return None;
        }
        Some(format!("temple/qr-codes/{}", stem))
    }
}

/// Placeholder served when no QR code is active, so the donation page
/// never renders empty.
pub fn fallback_qr(public_base_url: &str) -> serde_json::Value {
    serde_json::json!({
        "title": DEFAULT_QR_TITLE,
        "description": DEFAULT_QR_DESCRIPTION,
        "qr_image_url": format!("{}{}", public_base_url, DEFAULT_QR_IMAGE),
        "event_name": DEFAULT_QR_EVENT,
        "amount": DEFAULT_QR_AMOUNT,
    })
}
