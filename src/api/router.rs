use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, booking, health, media, qr};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

/// Videos go through this endpoint, so the multipart limit is generous.
const MEDIA_BODY_LIMIT: usize = 200 * 1024 * 1024;
const QR_BODY_LIMIT: usize = 5 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))

        // Bookings
        .route("/api/booking", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/booking/weekly", get(booking::weekly_bookings))
        .route("/api/booking/booked-dates", get(booking::booked_dates))
        .route("/api/booking/check-availability", get(booking::check_availability))
        .route("/api/booking/{reference}", get(booking::get_booking_by_reference))
        .route("/api/booking/{reference}/status", patch(booking::update_booking_status))

        // Media gallery
        .route("/api/media", post(media::upload_media).get(media::list_media)
            .layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT)))
        .route("/api/media/video-auth", get(media::video_auth_url))
        .route("/api/media/video-auth/callback", get(media::video_auth_callback))

        // Donation QR codes
        .route("/api/qr", get(qr::list_qr_codes).post(qr::create_qr_code)
            .layer(DefaultBodyLimit::max(QR_BODY_LIMIT)))
        .route("/api/qr/active", get(qr::active_qr_code))
        .route("/api/qr/{id}", patch(qr::update_qr_code).delete(qr::delete_qr_code)
            .layer(DefaultBodyLimit::max(QR_BODY_LIMIT)))

        // Locally stored QR images and legacy media files
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
