use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::media::Media;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub message: String,
    pub booking: BookingSummary,
}

/// The subset of a booking echoed back after creation.
#[derive(Serialize)]
pub struct BookingSummary {
    pub id: String,
    pub booking_reference: String,
    pub status: String,
    pub sms_sent: bool,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub date: NaiveDate,
}

#[derive(Serialize)]
pub struct UploadBatchResponse {
    pub message: String,
    pub results: Vec<FileUploadResult>,
}

/// Outcome for one file in an upload batch. Exactly one of `media` and
/// `error` is set.
#[derive(Serialize)]
pub struct FileUploadResult {
    pub file_name: String,
    pub media: Option<Media>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct VideoAuthUrlResponse {
    pub auth_url: String,
}
