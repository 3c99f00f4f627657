use crate::domain::{models::credential::Credential, ports::CredentialRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCredentialRepo {
    pool: PgPool,
}

impl PostgresCredentialRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepo {
    async fn get(&self, provider: &str) -> Result<Option<Credential>, AppError> {
        sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE provider = $1")
            .bind(provider)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert(&self, credential: &Credential) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO credentials (provider, access_token, refresh_token, expires_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (provider) DO UPDATE SET
               access_token = EXCLUDED.access_token,
               refresh_token = EXCLUDED.refresh_token,
               expires_at = EXCLUDED.expires_at,
               updated_at = EXCLUDED.updated_at",
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
