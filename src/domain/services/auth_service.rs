use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Duration, Utc};

const TOKEN_LIFETIME_DAYS: i64 = 7;

pub struct AuthService {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            issuer: config.auth_issuer.clone(),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.id.clone(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
            iat: now.timestamp() as usize,
            email: user.email.clone(),
            role: user.role.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::{AuthMethod, User, ROLE_ADMIN};

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "sqlite://ignored".to_string(),
            port: 0,
            public_base_url: "http://localhost:5000".to_string(),
            upload_dir: "./uploads".to_string(),
            jwt_secret: secret.to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: None,
            admin_password: None,
            admin_phone: "+919876543210".to_string(),
            sms_api_url: None,
            sms_api_key: String::new(),
            sms_sender_id: "TEMPLE".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: String::new(),
            cloudinary_api_secret: String::new(),
            youtube_client_id: String::new(),
            youtube_client_secret: String::new(),
            youtube_redirect_uri: String::new(),
        }
    }

    fn sample_user() -> User {
        User::new(
            "admin".to_string(),
            "admin@temple.org".to_string(),
            AuthMethod::LocalPassword("hash".to_string()),
            ROLE_ADMIN,
        )
    }

    #[test]
    fn test_round_trip() {
        let svc = AuthService::new(&test_config("test-secret"));
        let user = sample_user();

        let token = svc.issue_token(&user).unwrap();
        let claims = svc.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "admin@temple.org");
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let svc = AuthService::new(&test_config("test-secret"));
        assert!(matches!(
            svc.verify_token("not-a-jwt"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let svc = AuthService::new(&test_config("test-secret"));
        let other = AuthService::new(&test_config("other-secret"));

        let token = other.issue_token(&sample_user()).unwrap();

        assert!(matches!(svc.verify_token(&token), Err(AppError::Unauthorized)));
    }
}
