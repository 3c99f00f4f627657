use crate::domain::{models::booking::{Booking, BookingStatus}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Row};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, customer_name, mobile_number, event_date, function_type, guest_count, address, event_time, requirements, advance_amount, total_amount, status, booking_reference, sms_sent, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) RETURNING *"
        )
            .bind(&booking.id)
            .bind(&booking.customer_name)
            .bind(&booking.mobile_number)
            .bind(booking.event_date)
            .bind(&booking.function_type)
            .bind(&booking.guest_count)
            .bind(&booking.address)
            .bind(&booking.event_time)
            .bind(&booking.requirements)
            .bind(&booking.advance_amount)
            .bind(&booking.total_amount)
            .bind(&booking.status)
            .bind(&booking.booking_reference)
            .bind(booking.sms_sent)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn date_is_blocked(&self, date: NaiveDate) -> Result<bool, AppError> {
        // Pending holds the date just as hard as confirmed does.
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings WHERE event_date = $1 AND status IN ('pending', 'confirmed')"
        )
            .bind(date)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_week(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE event_date >= $1 AND event_date <= $2 AND status != 'cancelled' ORDER BY event_date ASC"
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_dates(&self) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT event_date FROM bookings WHERE status = 'confirmed' ORDER BY event_date ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *"
        )
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_sms_sent(&self, id: &str, sent: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE bookings SET sms_sent = $1, updated_at = $2 WHERE id = $3")
            .bind(sent)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
