use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub public_base_url: String,
    pub upload_dir: String,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_phone: String,
    pub sms_api_url: Option<String>,
    pub sms_api_key: String,
    pub sms_sender_id: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub youtube_client_id: String,
    pub youtube_client_secret: String,
    pub youtube_redirect_uri: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().expect("PORT must be a number"),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.temple.local".to_string()),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            admin_phone: env::var("ADMIN_PHONE").unwrap_or_else(|_| "+919876543210".to_string()),
            sms_api_url: env::var("SMS_API_URL").ok(),
            sms_api_key: env::var("SMS_API_KEY").unwrap_or_default(),
            sms_sender_id: env::var("SMS_SENDER_ID").unwrap_or_else(|_| "TEMPLE".to_string()),
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok().filter(|v| !v.trim().is_empty()),
            cloudinary_api_key: env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
            cloudinary_api_secret: env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            youtube_client_id: env::var("YOUTUBE_CLIENT_ID").unwrap_or_default(),
            youtube_client_secret: env::var("YOUTUBE_CLIENT_SECRET").unwrap_or_default(),
            youtube_redirect_uri: env::var("YOUTUBE_REDIRECT_URI").unwrap_or_default(),
        }
    }
}
