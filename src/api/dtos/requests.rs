use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Required fields arrive as options so a single response can name every
/// missing one.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: Option<String>,
    pub mobile_number: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub function_type: Option<String>,
    pub guest_count: Option<String>,
    pub address: Option<String>,
    pub event_time: Option<String>,
    pub requirements: Option<String>,
    pub advance_amount: Option<String>,
    pub total_amount: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct MediaListQuery {
    pub event_name: Option<String>,
}

#[derive(Deserialize)]
pub struct VideoAuthCallbackQuery {
    pub code: Option<String>,
}
