use temple_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_credential_repo::SqliteCredentialRepo,
        sqlite_media_repo::SqliteMediaRepo,
        sqlite_qr_repo::SqliteQrRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    infra::uploads::UploadStore,
    domain::services::auth_service::AuthService,
    domain::models::user::{AuthMethod, User, ROLE_ADMIN, ROLE_USER},
    domain::ports::{HostedImage, HostedVideo, ImageHost, SmsGateway, VideoHost},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use tower::ServiceExt;
use serde_json::Value;

/// Image host stand-in. Uploads succeed unless the file name contains
/// "fail"; every call is recorded so tests can assert on it.
pub struct MockImageHost {
    pub configured: Arc<AtomicBool>,
    pub uploaded: Arc<Mutex<Vec<String>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ImageHost for MockImageHost {
    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    async fn upload(&self, _bytes: &[u8], file_name: &str, folder: &str) -> Result<HostedImage, AppError> {
        if file_name.contains("fail") {
            return Err(AppError::Upstream("Image host rejected the file".to_string()));
        }
        self.uploaded.lock().unwrap().push(file_name.to_string());
        let stem = file_name.rsplit_once('.').map(|(s, _)| s).unwrap_or(file_name);
        Ok(HostedImage {
            url: format!("https://res.cloudinary.com/test/image/upload/v1/{}/{}.jpg", folder, stem),
            public_id: format!("{}/{}", folder, stem),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), AppError> {
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub struct MockVideoHost {
    pub uploads: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl VideoHost for MockVideoHost {
    fn authorize_url(&self) -> Result<String, AppError> {
        Ok("https://accounts.google.com/o/oauth2/v2/auth?client_id=test".to_string())
    }

    async fn exchange_code(&self, _code: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn upload(&self, _file_path: &Path, title: &str, _description: &str) -> Result<HostedVideo, AppError> {
        self.uploads.lock().unwrap().push(title.to_string());
        Ok(HostedVideo {
            video_id: "vid12345".to_string(),
            url: "https://www.youtube.com/watch?v=vid12345".to_string(),
            embed_url: "https://www.youtube.com/embed/vid12345".to_string(),
            thumbnail_url: "https://img.youtube.com/vi/vid12345/maxresdefault.jpg".to_string(),
        })
    }
}

pub struct MockSmsGateway {
    pub fail: Arc<AtomicBool>,
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("SMS gateway unavailable".to_string()));
        }
        self.sent.lock().unwrap().push((phone.to_string(), message.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub upload_dir: String,
    pub state: Arc<AppState>,
    pub image_configured: Arc<AtomicBool>,
    pub uploaded_images: Arc<Mutex<Vec<String>>>,
    pub deleted_images: Arc<Mutex<Vec<String>>>,
    pub uploaded_videos: Arc<Mutex<Vec<String>>>,
    pub sms_fail: Arc<AtomicBool>,
    pub sms_sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let upload_dir = format!("test_uploads_{}", Uuid::new_v4());

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            public_base_url: "http://localhost:5000".to_string(),
            upload_dir: upload_dir.clone(),
            jwt_secret: "test-secret-key".to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: None,
            admin_password: None,
            admin_phone: "+919999988888".to_string(),
            sms_api_url: None,
            sms_api_key: String::new(),
            sms_sender_id: "TEMPLE".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: String::new(),
            cloudinary_api_secret: String::new(),
            youtube_client_id: String::new(),
            youtube_client_secret: String::new(),
            youtube_redirect_uri: String::new(),
        };

        let image_configured = Arc::new(AtomicBool::new(true));
        let uploaded_images = Arc::new(Mutex::new(Vec::new()));
        let deleted_images = Arc::new(Mutex::new(Vec::new()));
        let uploaded_videos = Arc::new(Mutex::new(Vec::new()));
        let sms_fail = Arc::new(AtomicBool::new(false));
        let sms_sent = Arc::new(Mutex::new(Vec::new()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            media_repo: Arc::new(SqliteMediaRepo::new(pool.clone())),
            qr_repo: Arc::new(SqliteQrRepo::new(pool.clone())),
            credential_repo: Arc::new(SqliteCredentialRepo::new(pool.clone())),
            auth_service: Arc::new(AuthService::new(&config)),
            image_host: Arc::new(MockImageHost {
                configured: image_configured.clone(),
                uploaded: uploaded_images.clone(),
                deleted: deleted_images.clone(),
            }),
            video_host: Arc::new(MockVideoHost {
                uploads: uploaded_videos.clone(),
            }),
            sms_gateway: Arc::new(MockSmsGateway {
                fail: sms_fail.clone(),
                sent: sms_sent.clone(),
            }),
            uploads: Arc::new(UploadStore::new(&upload_dir).expect("Failed to create upload dir")),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            upload_dir,
            state,
            image_configured,
            uploaded_images,
            deleted_images,
            uploaded_videos,
            sms_fail,
            sms_sent,
        }
    }

    pub async fn seed_user(&self, email: &str, password: &str, role: &str) -> User {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let user = User::new(
            email.split('@').next().unwrap_or("user").to_string(),
            email.to_string(),
            AuthMethod::LocalPassword(hash),
            role,
        );
        self.state.user_repo.create(&user).await.expect("Failed to seed user")
    }

    /// Seeds the standard admin account and returns a bearer token for it.
    pub async fn admin_token(&self) -> String {
        self.seed_user("admin@temple.test", "admin-pass-123", ROLE_ADMIN).await;
        self.login("admin@temple.test", "admin-pass-123").await
    }

    /// Seeds a regular (non-admin) account and returns a bearer token.
    pub async fn user_token(&self) -> String {
        self.seed_user("visitor@temple.test", "visitor-pass-123", ROLE_USER).await;
        self.login("visitor@temple.test", "visitor-pass-123").await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["token"].as_str().expect("No token in login response").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Hand-rolled multipart encoder for request bodies in tests.
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

#[allow(dead_code)]
impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: format!("----test-boundary-{}", Uuid::new_v4()),
            bytes: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.bytes
    }
}
