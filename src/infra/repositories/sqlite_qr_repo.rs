use crate::domain::{models::qr::QrCode, ports::QrCodeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteQrRepo {
    pool: SqlitePool,
}

impl SqliteQrRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrCodeRepository for SqliteQrRepo {
    async fn create(&self, qr: &QrCode) -> Result<QrCode, AppError> {
        // Activation and the demotion of every other row commit together.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, QrCode>(
            "INSERT INTO qr_codes (id, title, description, qr_image_url, qr_code, is_active, event_name, amount, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
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
            sqlx::query("UPDATE qr_codes SET is_active = 0, updated_at = ? WHERE id != ?")
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
            "UPDATE qr_codes SET title = ?, description = ?, qr_image_url = ?, qr_code = ?, is_active = ?, event_name = ?, amount = ?, updated_at = ?
             WHERE id = ? RETURNING *"
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
            sqlx::query("UPDATE qr_codes SET is_active = 0, updated_at = ? WHERE id != ?")
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
        sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_active(&self) -> Result<Option<QrCode>, AppError> {
        sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE is_active = 1 ORDER BY updated_at DESC LIMIT 1"
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
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = ?")
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
