use axum::{response::IntoResponse, Json};
use chrono::Utc;

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
