//! JWT Token Service
//!
//! Issues and validates the bearer tokens carried by every authenticated
//! request. Claims carry the whole session context so handlers never do
//! an extra lookup for role or tenant.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::{Role, UserProfile};
use crate::utils::{AppError, AppResult};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, generating an ephemeral secret");
            generate_secret()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
        }
    }
}

/// Generate a random printable secret (development fallback)
fn generate_secret() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..48)
        .map(|_| rng.gen_range(b'!'..=b'~') as char)
        .collect()
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: Role,
    /// Tenant grouping key
    pub restaurant_name: String,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Current user context, decoded from a validated token.
///
/// Passed explicitly into every domain operation that needs identity or
/// authorization; there is no ambient current-user global.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub restaurant_name: String,
    /// Issued-at of the backing token (seconds); used for revocation checks
    pub token_iat: i64,
}

impl CurrentUser {
    /// Require a capability, or fail with `Forbidden`
    pub fn require(&self, capability: super::Capability) -> AppResult<()> {
        if super::capabilities::role_has(self.role, capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role '{}' lacks the required capability",
                self.role
            )))
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            restaurant_name: claims.restaurant_name,
            token_iat: claims.iat,
        }
    }
}

/// JWT token service
#[derive(Debug)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    /// Issue a token for a profile
    pub fn issue(&self, user: &UserProfile) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user
                .id
                .as_ref()
                .map(|id| id.to_string())
                .ok_or_else(|| AppError::Internal("User profile without id".to_string()))?,
            name: user.name.clone(),
            role: user.role,
            restaurant_name: user.restaurant_name.clone(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the bearer token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: Some(surrealdb::RecordId::from_table_key("users", "u1")),
            email: "chef@example.com".to_string(),
            name: "Chef".to_string(),
            hash_pass: String::new(),
            role,
            restaurant_name: "Chez Fifi".to_string(),
            status: crate::db::models::UserStatus::Enabled,
            created_at: None,
        }
    }

    #[test]
    fn issue_and_validate_round_trip() {
        let service = JwtService::new(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            expiration_minutes: 60,
        });

        let token = service.issue(&profile(Role::Cashier)).unwrap();
        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.name, "Chef");
        assert_eq!(claims.role, Role::Cashier);
        assert_eq!(claims.restaurant_name, "Chez Fifi");
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::default();
        assert!(matches!(
            service.validate("not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn bearer_prefix_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
