use crate::domain::{models::media::Media, ports::MediaRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresMediaRepo {
    pool: PgPool,
}

impl PostgresMediaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepo {
    async fn create(&self, media: &Media) -> Result<Media, AppError> {
        sqlx::query_as::<_, Media>(
            "INSERT INTO media (id, title, description, event_name, media_type, image_url, image_public_id, video_id, video_url, embed_url, thumbnail_url, file_path, event_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *"
        )
            .bind(&media.id)
            .bind(&media.title)
            .bind(&media.description)
            .bind(&media.event_name)
            .bind(&media.media_type)
            .bind(&media.image_url)
            .bind(&media.image_public_id)
            .bind(&media.video_id)
            .bind(&media.video_url)
            .bind(&media.embed_url)
            .bind(&media.thumbnail_url)
            .bind(&media.file_path)
            .bind(media.event_date)
            .bind(media.created_at)
            .bind(media.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, event_name: Option<&str>) -> Result<Vec<Media>, AppError> {
        let query = if event_name.is_some() {
            "SELECT * FROM media WHERE event_name = $1 ORDER BY created_at DESC"
        } else {
            "SELECT * FROM media ORDER BY created_at DESC"
        };

        let mut q = sqlx::query_as::<_, Media>(query);
        if let Some(name) = event_name {
            q = q.bind(name);
        }
        q.fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
