use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const PROVIDER_YOUTUBE: &str = "youtube";

/// OAuth tokens for an upstream provider, keyed by provider name so a
/// restart does not force re-authorization.
#[derive(Debug, FromRow, Clone)]
pub struct Credential {
    pub provider: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        provider: &str,
        access_token: String,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();

        Self {
            provider: provider.to_string(),
            access_token,
            refresh_token,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Treats a missing expiry as already expired so a refresh is attempted
    /// rather than sending a possibly stale token upstream.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) => at <= now,
            None => true,
        }
    }
}
