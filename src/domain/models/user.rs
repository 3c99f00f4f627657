use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Exactly one credential path per account: a local password hash or a
/// linked external identity, never both and never neither.
pub enum AuthMethod {
    LocalPassword(String),
    ExternalIdentity(String),
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub avatar: Option<String>,
    pub is_verified: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, method: AuthMethod, role: &str) -> Self {
        let (password_hash, google_id) = match method {
            AuthMethod::LocalPassword(hash) => (Some(hash), None),
            AuthMethod::ExternalIdentity(id) => (None, Some(id)),
        };
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email: email.trim().to_lowercase(),
            password_hash,
            google_id,
            avatar: None,
            is_verified: false,
            role: role.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
