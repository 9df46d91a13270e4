//! JWT Extractor
//!
//! Custom extractor that validates the bearer token and materializes the
//! [`CurrentUser`] session context for a handler.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => {
                JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
            }
            None => {
                tracing::warn!(uri = %parts.uri, "Request without authorization header");
                return Err(AppError::Unauthorized);
            }
        };

        // Validate token
        let claims = match state.jwt_service.validate(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
                return Err(match e {
                    crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                });
            }
        };

        let user = CurrentUser::from(claims);

        // A provisioning flow may have dropped this user's session since
        // the token was issued
        if state.sessions.is_revoked(&user.id, user.token_iat) {
            tracing::warn!(user_id = %user.id, "Rejected token from revoked session");
            return Err(AppError::TokenExpired);
        }

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
