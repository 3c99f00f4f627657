use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, CredentialRepository, ImageHost, MediaRepository,
    QrCodeRepository, SmsGateway, UserRepository, VideoHost,
};
use crate::domain::services::auth_service::AuthService;
use crate::infra::uploads::UploadStore;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub media_repo: Arc<dyn MediaRepository>,
    pub qr_repo: Arc<dyn QrCodeRepository>,
    pub credential_repo: Arc<dyn CredentialRepository>,
    pub auth_service: Arc<AuthService>,
    pub image_host: Arc<dyn ImageHost>,
    pub video_host: Arc<dyn VideoHost>,
    pub sms_gateway: Arc<dyn SmsGateway>,
    pub uploads: Arc<UploadStore>,
}
