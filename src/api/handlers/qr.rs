use axum::{extract::{Multipart, Path, State}, response::IntoResponse, Json, http::StatusCode};
use axum::body::Bytes;
use crate::state::AppState;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::qr::{fallback_qr, NewQrCodeParams, QrCode, DEFAULT_QR_IMAGE};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

const QR_FOLDER: &str = "temple/qr-codes";

#[derive(Default)]
struct QrForm {
    title: Option<String>,
    description: Option<String>,
    event_name: Option<String>,
    amount: Option<String>,
    qr_code: Option<String>,
    is_active: Option<bool>,
    image: Option<(String, Bytes)>,
}

pub async fn list_qr_codes(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let codes = state.qr_repo.list_all().await?;
    Ok(Json(codes))
}

/// Public donation endpoint. Always answers with something scannable:
/// the active record, or the general-donation fallback when none is active.
pub async fn active_qr_code(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let Some(qr) = state.qr_repo.find_active().await? else {
        return Ok(Json(fallback_qr(&state.config.public_base_url)));
    };

    // Local image paths become absolute so any client origin can load them.
    let mut value = serde_json::to_value(&qr).map_err(|_| AppError::Internal)?;
    if qr.qr_image_url.starts_with("/uploads/") {
        value["qr_image_url"] = serde_json::Value::String(format!(
            "{}{}",
            state.config.public_base_url, qr.qr_image_url
        ));
    }

    Ok(Json(value))
}

pub async fn create_qr_code(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_qr_form(multipart).await?;

    let qr_image_url = match &form.image {
        Some((file_name, bytes)) => store_qr_image(&state, file_name, bytes).await?,
        None => DEFAULT_QR_IMAGE.to_string(),
    };

    let qr = QrCode::new(NewQrCodeParams {
        title: form.title,
        description: form.description,
        qr_image_url,
        qr_code: form.qr_code,
        event_name: form.event_name,
        amount: form.amount,
        created_by: claims.sub,
    });

    let created = state.qr_repo.create(&qr).await?;
    info!("QR code created: {}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "QR code created successfully",
            "qr_code": created
        })),
    ))
}

pub async fn update_qr_code(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_qr_form(multipart).await?;

    let mut qr = state.qr_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("QR code not found".into()))?;

    if let Some((file_name, bytes)) = &form.image {
        let old_public_id = qr.hosted_image_public_id();
        qr.qr_image_url = store_qr_image(&state, file_name, bytes).await?;

        // Replacing a hosted image retires the old copy at the host.
        if qr.qr_image_url.starts_with("http")
            && let Some(public_id) = old_public_id {
            if let Err(e) = state.image_host.delete(&public_id).await {
                warn!("Failed to delete replaced QR image {}: {}", public_id, e);
            }
        }
    }

    if let Some(title) = form.title { qr.title = title; }
    if let Some(description) = form.description { qr.description = description; }
    if let Some(event_name) = form.event_name { qr.event_name = event_name; }
    if let Some(amount) = form.amount { qr.amount = amount; }
    if let Some(code) = form.qr_code { qr.qr_code = Some(code); }
    // Any edit reactivates the record unless the caller says otherwise.
    qr.is_active = form.is_active.unwrap_or(true);

    let updated = state.qr_repo.update(&qr).await?;
    info!("QR code updated: {}", updated.id);

    Ok(Json(serde_json::json!({
        "message": "QR code updated successfully",
        "qr_code": updated
    })))
}

pub async fn delete_qr_code(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let qr = state.qr_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("QR code not found".into()))?;

    // Image cleanup is best effort; the row goes away regardless. The
    // shared default image is never unlinked.
    if let Some(public_id) = qr.hosted_image_public_id() {
        if let Err(e) = state.image_host.delete(&public_id).await {
            warn!("Failed to delete hosted QR image {}: {}", public_id, e);
        }
    } else if qr.qr_image_url.starts_with("/uploads/") && qr.qr_image_url != DEFAULT_QR_IMAGE {
        state.uploads.remove_public_path(&qr.qr_image_url).await;
    }

    state.qr_repo.delete(&id).await?;
    info!("QR code deleted: {}", id);

    Ok(Json(MessageResponse {
        message: "QR code deleted successfully".to_string(),
    }))
}

/// Image host first when configured, local uploads directory otherwise.
/// A host failure lands on local storage instead of failing the request.
async fn store_qr_image(state: &AppState, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if state.image_host.is_configured() {
        match state.image_host.upload(bytes, file_name, QR_FOLDER).await {
            Ok(hosted) => return Ok(hosted.url),
            Err(e) => warn!("QR image host upload failed, storing locally: {}", e),
        }
    }
    state.uploads.store_qr_image(file_name, bytes).await
}

async fn read_qr_form(mut multipart: Multipart) -> Result<QrForm, AppError> {
    let mut form = QrForm::default();

    while let Some(field) = multipart.next_field().await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(read_text(field, "title").await?),
            "description" => form.description = Some(read_text(field, "description").await?),
            "event_name" => form.event_name = Some(read_text(field, "event_name").await?),
            "amount" => form.amount = Some(read_text(field, "amount").await?),
            "qr_code" => form.qr_code = Some(read_text(field, "qr_code").await?),
            "is_active" => {
                let raw = read_text(field, "is_active").await?;
                form.is_active = Some(match raw.as_str() {
                    "true" | "1" => true,
                    "false" | "0" => false,
                    _ => return Err(AppError::Validation("Invalid value for is_active".into())),
                });
            }
            "qr_image" => {
                let file_name = field.file_name().unwrap_or("qr.png").to_string();
                let bytes = field.bytes().await
                    .map_err(|e| AppError::Validation(format!("Failed to read QR image: {e}")))?;
                form.image = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field.text().await
        .map_err(|e| AppError::Validation(format!("Invalid value for {name}: {e}")))
}
