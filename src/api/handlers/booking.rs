use axum::{extract::{Path, Query, State}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::dtos::requests::{AvailabilityQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::{AvailabilityResponse, BookingCreatedResponse, BookingSummary};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::booking::{Booking, BookingStatus, FunctionType, GuestBucket, NewBookingParams};
use crate::domain::services::{availability, notifications};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut missing = Vec::new();

    let customer_name = text_field(payload.customer_name, "customer_name", &mut missing);
    let mobile_number = text_field(payload.mobile_number, "mobile_number", &mut missing);
    let function_type_raw = text_field(payload.function_type, "function_type", &mut missing);
    let guest_count_raw = text_field(payload.guest_count, "guest_count", &mut missing);
    let address = text_field(payload.address, "address", &mut missing);

    let Some(event_date) = payload.event_date else {
        missing.push("event_date".to_string());
        return Err(AppError::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let function_type = FunctionType::parse(&function_type_raw)
        .ok_or_else(|| AppError::Validation(format!("Invalid function type: {function_type_raw}")))?;
    let guest_count = GuestBucket::parse(&guest_count_raw)
        .ok_or_else(|| AppError::Validation(format!("Invalid guest count: {guest_count_raw}")))?;

    if state.booking_repo.date_is_blocked(event_date).await? {
        return Err(AppError::DateConflict(
            "Selected date is already booked. Please choose another date.".into(),
        ));
    }

    let booking = Booking::new(NewBookingParams {
        customer_name,
        mobile_number,
        event_date,
        function_type,
        guest_count,
        address,
        event_time: payload.event_time,
        requirements: payload.requirements,
        advance_amount: payload.advance_amount,
        total_amount: payload.total_amount,
    });

    let mut created = state.booking_repo.create(&booking).await?;
    info!("Booking created: {} ({})", created.id, created.booking_reference);

    let alert = notifications::admin_booking_alert(&created);
    match state.sms_gateway.send(&state.config.admin_phone, &alert).await {
        Ok(()) => {
            state.booking_repo.mark_sms_sent(&created.id, true).await?;
            created.sms_sent = true;
        }
        Err(e) => warn!("Admin booking alert SMS failed: {}", e),
    }

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            message: "Booking created successfully".to_string(),
            booking: BookingSummary {
                id: created.id,
                booking_reference: created.booking_reference,
                status: created.status,
                sms_sent: created.sms_sent,
            },
        }),
    ))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all().await?;
    Ok(Json(bookings))
}

pub async fn weekly_bookings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = availability::week_bounds(Utc::now().date_naive());
    let bookings = state.booking_repo.list_week(start, end).await?;
    Ok(Json(bookings))
}

/// Dates shown as taken on the booking calendar. Only confirmed bookings
/// appear here; pending ones still block creation but stay off the calendar.
pub async fn booked_dates(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let dates = state.booking_repo.list_confirmed_dates().await?;
    Ok(Json(dates))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = query.date
        .ok_or(AppError::Validation("Date parameter is required".into()))?;

    let available = !state.booking_repo.date_is_blocked(date).await?;
    Ok(Json(AvailabilityResponse { available, date }))
}

pub async fn get_booking_by_reference(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_reference(&reference).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = BookingStatus::parse(&payload.status)
        .ok_or(AppError::Validation("Invalid status".into()))?;

    let booking = state.booking_repo.update_status(&id, status).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    info!("Booking status updated: {} -> {}", booking.id, booking.status);

    // Confirmation SMS is best effort; the status change already happened.
    if status == BookingStatus::Confirmed {
        let message = notifications::customer_confirmation(&booking, &state.config.admin_phone);
        if let Err(e) = state.sms_gateway.send(&booking.mobile_number, &message).await {
            warn!("Confirmation SMS to customer failed: {}", e);
        }
    }

    Ok(Json(serde_json::json!({
        "message": "Booking status updated successfully",
        "booking": booking
    })))
}

fn text_field(value: Option<String>, field: &str, missing: &mut Vec<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field.to_string());
            String::new()
        }
    }
}
