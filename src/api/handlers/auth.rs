use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::domain::models::user::{AuthMethod, User, ROLE_USER};
use std::sync::Arc;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.trim();
    let email = payload.email.trim().to_lowercase();
    if username.is_empty() || email.is_empty() {
        return Err(AppError::Validation("Username and email are required".to_string()));
    }
    if payload.password.len() < 6 {
        return Err(AppError::Validation("Password must be at least 6 characters".to_string()));
    }

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = User::new(
        username.to_string(),
        email,
        AuthMethod::LocalPassword(password_hash),
        ROLE_USER,
    );
    let user = state.user_repo.create(&user).await?;
    let token = state.auth_service.issue_token(&user)?;

    info!("User registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user: profile(user) })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&payload.email.trim().to_lowercase()).await?
        .ok_or(AppError::Unauthorized)?;

    // Accounts created through an external identity have no local password.
    let stored_hash = user.password_hash.as_deref().ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.auth_service.issue_token(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse { token, user: profile(user) }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&claims.sub).await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile(user)))
}

fn profile(user: User) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
        avatar: user.avatar,
    }
}
