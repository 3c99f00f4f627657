use crate::domain::{models::qr::QrCode, ports::QrCodeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresQrRepo {
    pool: PgPool,
}

impl PostgresQrRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrCodeRepository for PostgresQrRepo {
    async fn create(&self, qr: &QrCode) -> Result<QrCode, AppError> {
        // Activation and the demotion of every other row commit together.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, QrCode>(
            "INSERT INTO qr_codes (id, title, description, qr_image_url, qr_code, is_active, event_name, amount, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *"
        )
            .bind(&qr.id)
            .bind(&qr.title)
            .bind(&qr.description)
            .bind(&qr.qr_image_url)
            .bind(&qr.qr_code)
            .bind(qr.is_active)
            .bind(&qr.event_name)
            .bind(&qr.amount)
            .bind(&qr.created_by)
            .bind(qr.created_at)
            .bind(qr.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if created.is_active {
            sqlx::query("UPDATE qr_codes SET is_active = FALSE, updated_at = $1 WHERE id != $2")
                .bind(Utc::now())
                .bind(&created.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn update(&self, qr: &QrCode) -> Result<QrCode, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, QrCode>(
            "UPDATE qr_codes SET title = $1, description = $2, qr_image_url = $3, qr_code = $4, is_active = $5, event_name = $6, amount = $7, updated_at = $8
             WHERE id = $9 RETURNING *"
        )
            .bind(&qr.title)
            .bind(&qr.description)
            .bind(&qr.qr_image_url)
            .bind(&qr.qr_code)
            .bind(qr.is_active)
            .bind(&qr.event_name)
            .bind(&qr.amount)
            .bind(Utc::now())
            .bind(&qr.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if updated.is_active {
            sqlx::query("UPDATE qr_codes SET is_active = FALSE, updated_at = $1 WHERE id != $2")
                .bind(Utc::now())
                .bind(&updated.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<QrCode>, AppError> {
        sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_active(&self) -> Result<Option<QrCode>, AppError> {
        sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE is_active = TRUE ORDER BY updated_at DESC LIMIT 1"
        )
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<QrCode>, AppError> {
        sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("QR code not found".into()));
        }
        Ok(())
    }
}
