/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Look up the member by email
 * 2. Verify the password with bcrypt
 * 3. Issue a session token
 *
 * # Security
 *
 * - Unknown email and wrong password return the same error, so the
 *   endpoint does not confirm which addresses are registered
 * - Passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::ApiError;
use crate::backend::members::store::MemberStore;

/// Login handler
///
/// Verifies the email and password and returns a session token on success.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store, hashing, or token failure
pub async fn login(
    State(store): State<Arc<dyn MemberStore>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let member = store
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, unknown email: {}", request.email);
            ApiError::Unauthenticated
        })?;

    let valid = verify(&request.password, &member.password_hash)
        .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;

    if !valid {
        tracing::warn!("Login failed, invalid password for: {}", request.email);
        return Err(ApiError::Unauthenticated);
    }

    let token = create_token(member.id, member.email.clone(), member.name.clone())
        .map_err(|e| ApiError::internal(format!("token creation failed: {e}")))?;

    tracing::info!("Member logged in: {} ({})", member.name, member.email);

    Ok(Json(AuthResponse {
        token,
        member: member.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::handlers::signup::signup;
    use crate::backend::auth::handlers::types::SignupRequest;
    use crate::backend::members::memory::MemoryMemberStore;

    async fn store_with_member() -> Arc<dyn MemberStore> {
        let store: Arc<dyn MemberStore> = Arc::new(MemoryMemberStore::new());
        signup(
            State(store.clone()),
            Json(SignupRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                age: 30,
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_login_success() {
        let store = store_with_member().await;
        let result = login(
            State(store),
            Json(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await;
        let response = result.unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.member.name, "Ada");
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let store = store_with_member().await;
        let err = login(
            State(store),
            Json(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrongpassword".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let store: Arc<dyn MemberStore> = Arc::new(MemoryMemberStore::new());
        let err = login(
            State(store),
            Json(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
