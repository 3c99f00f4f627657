use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use crate::domain::models::user::ROLE_ADMIN;
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// Any authenticated caller, identified by a bearer token.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts.headers.get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_token(token)?;

        Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser(claims))
    }
}

/// Authenticated caller holding the admin role. Mutating endpoints take
/// this instead of `AuthUser`.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != ROLE_ADMIN {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminUser(claims))
    }
}
