use crate::domain::{models::credential::Credential, ports::CredentialRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCredentialRepo {
    pool: SqlitePool,
}

impl SqliteCredentialRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepo {
    async fn get(&self, provider: &str) -> Result<Option<Credential>, AppError> {
        sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE provider = ?")
            .bind(provider)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert(&self, credential: &Credential) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO credentials (provider, access_token, refresh_token, expires_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(provider) DO UPDATE SET
               access_token = excluded.access_token,
               refresh_token = excluded.refresh_token,
               expires_at = excluded.expires_at,
               updated_at = excluded.updated_at",
        )
            .bind(&credential.provider)
            .bind(&credential.access_token)
            .bind(&credential.refresh_token)
            .bind(credential.expires_at)
            .bind(credential.created_at)
            .bind(credential.updated_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
