use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::FromRow;
use rand::Rng;

/// Hall booking lifecycle. Transitions are applied unconditionally by the
/// status update endpoint; the enum only closes the value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    Wedding,
    Engagement,
    Reception,
    Birthday,
    Corporate,
    Other,
}

impl FunctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionType::Wedding => "wedding",
            FunctionType::Engagement => "engagement",
            FunctionType::Reception => "reception",
            FunctionType::Birthday => "birthday",
            FunctionType::Corporate => "corporate",
            FunctionType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wedding" => Some(FunctionType::Wedding),
            "engagement" => Some(FunctionType::Engagement),
            "reception" => Some(FunctionType::Reception),
            "birthday" => Some(FunctionType::Birthday),
            "corporate" => Some(FunctionType::Corporate),
            "other" => Some(FunctionType::Other),
            _ => None,
        }
    }
}

/// Guest-count buckets as presented on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestBucket {
    UpTo100,
    UpTo200,
    UpTo300,
    UpTo500,
    Over500,
}

impl GuestBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestBucket::UpTo100 => "50-100",
            GuestBucket::UpTo200 => "100-200",
            GuestBucket::UpTo300 => "200-300",
            GuestBucket::UpTo500 => "300-500",
            GuestBucket::Over500 => "500+",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "50-100" => Some(GuestBucket::UpTo100),
            "100-200" => Some(GuestBucket::UpTo200),
            "200-300" => Some(GuestBucket::UpTo300),
            "300-500" => Some(GuestBucket::UpTo500),
            "500+" => Some(GuestBucket::Over500),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub mobile_number: String,
    pub event_date: NaiveDate,
    pub function_type: String,
    pub guest_count: String,
    pub address: String,
    pub event_time: Option<String>,
    pub requirements: Option<String>,
    pub advance_amount: Option<String>,
    pub total_amount: Option<String>,
    pub status: String,
    pub booking_reference: String,
    pub sms_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub customer_name: String,
    pub mobile_number: String,
    pub event_date: NaiveDate,
    pub function_type: FunctionType,
    pub guest_count: GuestBucket,
    pub address: String,
    pub event_time: Option<String>,
    pub requirements: Option<String>,
    pub advance_amount: Option<String>,
    pub total_amount: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            customer_name: params.customer_name,
            mobile_number: params.mobile_number,
            event_date: params.event_date,
            function_type: params.function_type.as_str().to_string(),
            guest_count: params.guest_count.as_str().to_string(),
            address: params.address,
            event_time: params.event_time,
            requirements: params.requirements,
            advance_amount: params.advance_amount,
            total_amount: params.total_amount,
            status: BookingStatus::Pending.as_str().to_string(),
            booking_reference: generate_reference(now),
            sms_sent: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Human-readable reference like `BK202608042`: literal `BK`, 4-digit year,
/// 2-digit month, 3-digit random. Assigned once at creation; the database
/// unique constraint catches the rare collision.
pub fn generate_reference(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("BK{}{:02}{:03}", now.year(), now.month(), suffix)
}
