use crate::domain::models::{
    booking::{Booking, BookingStatus}, credential::Credential, media::Media,
    qr::QrCode, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn admin_exists(&self) -> Result<bool, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, AppError>;
    /// True when a booking on `date` holds the hall per the blocking rule
    /// (`pending` or `confirmed`).
    async fn date_is_blocked(&self, date: NaiveDate) -> Result<bool, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    /// Bookings in `[start, end]` excluding cancelled, ordered by event date.
    async fn list_week(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError>;
    /// Event dates of confirmed bookings, for the public calendar.
    async fn list_confirmed_dates(&self) -> Result<Vec<NaiveDate>, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Option<Booking>, AppError>;
    async fn mark_sms_sent(&self, id: &str, sent: bool) -> Result<(), AppError>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(&self, media: &Media) -> Result<Media, AppError>;
    async fn list(&self, event_name: Option<&str>) -> Result<Vec<Media>, AppError>;
}

#[async_trait]
pub trait QrCodeRepository: Send + Sync {
    /// Persists the row; when it is active, deactivates every other row in
    /// the same transaction.
    async fn create(&self, qr: &QrCode) -> Result<QrCode, AppError>;
    /// Full-row update with the same exclusivity enforcement as `create`.
    async fn update(&self, qr: &QrCode) -> Result<QrCode, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<QrCode>, AppError>;
    async fn find_active(&self) -> Result<Option<QrCode>, AppError>;
    async fn list_all(&self) -> Result<Vec<QrCode>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn get(&self, provider: &str) -> Result<Option<Credential>, AppError>;
    async fn upsert(&self, credential: &Credential) -> Result<(), AppError>;
}

#[derive(Debug, Clone)]
pub struct HostedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone)]
pub struct HostedVideo {
    pub video_id: String,
    pub url: String,
    pub embed_url: String,
    pub thumbnail_url: String,
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn upload(&self, bytes: &[u8], file_name: &str, folder: &str) -> Result<HostedImage, AppError>;
    async fn delete(&self, public_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VideoHost: Send + Sync {
    fn authorize_url(&self) -> Result<String, AppError>;
    /// Exchanges an OAuth code and persists the resulting tokens.
    async fn exchange_code(&self, code: &str) -> Result<(), AppError>;
    async fn upload(&self, file_path: &Path, title: &str, description: &str) -> Result<HostedVideo, AppError>;
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> Result<(), AppError>;
}
