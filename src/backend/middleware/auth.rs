/**
 * Authentication Extractor
 *
 * This module provides the extractor protected handlers use to require an
 * authenticated caller. It reads the session token from the Authorization
 * header, verifies it, and yields the member identity; requests without a
 * valid token are rejected with 401 before any handler logic runs.
 */

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// The authenticated member, resolved from the request's session token.
#[derive(Clone, Debug)]
pub struct AuthMember {
    pub member_id: Uuid,
    pub name: String,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthMember {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                ApiError::Unauthenticated
            })?;

        // Format: "Bearer <token>"
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::Unauthenticated
        })?;

        let claims = verify_token(token).map_err(|e| {
            tracing::warn!("Invalid session token: {:?}", e);
            ApiError::Unauthenticated
        })?;

        let member_id = Uuid::parse_str(&claims.sub).map_err(|e| {
            tracing::warn!("Invalid member ID in token: {:?}", e);
            ApiError::Unauthenticated
        })?;

        Ok(AuthMember {
            member_id,
            name: claims.name,
            email: claims.email,
        })
    }
}
