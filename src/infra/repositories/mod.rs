pub mod sqlite_booking_repo;
pub mod sqlite_credential_repo;
pub mod sqlite_media_repo;
pub mod sqlite_qr_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_credential_repo;
pub mod postgres_media_repo;
pub mod postgres_qr_repo;
pub mod postgres_user_repo;
