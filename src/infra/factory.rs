use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{error, info};
use tracing::log::LevelFilter;
use argon2::{Argon2, PasswordHasher, password_hash::{SaltString, rand_core::OsRng}};

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::{AuthMethod, User, ROLE_ADMIN};
use crate::domain::ports::{CredentialRepository, SmsGateway};
use crate::domain::services::auth_service::AuthService;
use crate::infra::hosting::{cloudinary::CloudinaryImageHost, youtube::YouTubeVideoHost};
use crate::infra::sms::{http_sms_service::HttpSmsService, log_sms_service::LogSmsService};
use crate::infra::uploads::UploadStore;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_credential_repo::PostgresCredentialRepo,
    postgres_media_repo::PostgresMediaRepo, postgres_qr_repo::PostgresQrRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_credential_repo::SqliteCredentialRepo,
    sqlite_media_repo::SqliteMediaRepo, sqlite_qr_repo::SqliteQrRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let uploads = Arc::new(
        UploadStore::new(&config.upload_dir).expect("Failed to prepare upload directory"),
    );

    let image_host = Arc::new(CloudinaryImageHost::new(
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
    ));

    let sms_gateway: Arc<dyn SmsGateway> = match &config.sms_api_url {
        Some(url) => Arc::new(HttpSmsService::new(
            url.clone(),
            config.sms_api_key.clone(),
            config.sms_sender_id.clone(),
        )),
        None => Arc::new(LogSmsService),
    };

    let auth_service = Arc::new(AuthService::new(config));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let credential_repo: Arc<dyn CredentialRepository> =
            Arc::new(PostgresCredentialRepo::new(pool.clone()));
        let video_host = Arc::new(YouTubeVideoHost::new(
            credential_repo.clone(),
            config.youtube_client_id.clone(),
            config.youtube_client_secret.clone(),
            config.youtube_redirect_uri.clone(),
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            media_repo: Arc::new(PostgresMediaRepo::new(pool.clone())),
            qr_repo: Arc::new(PostgresQrRepo::new(pool.clone())),
            credential_repo,
            auth_service,
            image_host,
            video_host,
            sms_gateway,
            uploads,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let credential_repo: Arc<dyn CredentialRepository> =
            Arc::new(SqliteCredentialRepo::new(pool.clone()));
        let video_host = Arc::new(YouTubeVideoHost::new(
            credential_repo.clone(),
            config.youtube_client_id.clone(),
            config.youtube_client_secret.clone(),
            config.youtube_redirect_uri.clone(),
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            media_repo: Arc::new(SqliteMediaRepo::new(pool.clone())),
            qr_repo: Arc::new(SqliteQrRepo::new(pool.clone())),
            credential_repo,
            auth_service,
            image_host,
            video_host,
            sms_gateway,
            uploads,
        }
    }
}

/// Creates the admin account on first boot when none exists and the admin
/// credentials are configured.
pub async fn seed_admin(state: &AppState) {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password)
    else {
        return;
    };

    match state.user_repo.admin_exists().await {
        Ok(true) => {
            info!("Admin user already exists, skipping seed");
            return;
        }
        Ok(false) => {}
        Err(e) => {
            error!("Failed to check for existing admin: {}", e);
            return;
        }
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = User::new(
        "admin".to_string(),
        email.clone(),
        AuthMethod::LocalPassword(password_hash),
        ROLE_ADMIN,
    );

    match state.user_repo.create(&admin).await {
        Ok(created) => info!("Admin user seeded: {}", created.email),
        Err(e) => error!("Failed to seed admin user: {}", e),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
