/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * # Registration Process
 *
 * 1. Validate name, email format, age, and password length
 * 2. Check that the email is not already registered
 * 3. Hash the password with bcrypt
 * 4. Create the member with empty relationship sets
 * 5. Issue a session token
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt at DEFAULT_COST
 * - Passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::ApiError;
use crate::backend::members::store::{MemberStore, NewMember, StoreError};

/// Sign up handler
///
/// Validates the input, creates the member, and returns a session token
/// for immediate authentication.
///
/// # Errors
///
/// * `400 Bad Request` - invalid name, email, age, password, or an email
///   that is already registered
/// * `500 Internal Server Error` - hashing, store, or token failure
pub async fn signup(
    State(store): State<Arc<dyn MemberStore>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Signup request for email: {}", request.email);

    let name = request.name.trim();
    if name.is_empty() || name.len() > 60 {
        return Err(ApiError::invalid_operation(
            "Name must be between 1 and 60 characters",
        ));
    }
    if !request.email.contains('@') {
        return Err(ApiError::invalid_operation("Invalid email format"));
    }
    if request.age < 13 {
        return Err(ApiError::invalid_operation("Members must be 13 or older"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::invalid_operation(
            "Password must be at least 8 characters",
        ));
    }

    if store.find_by_email(&request.email).await?.is_some() {
        tracing::warn!("Signup rejected, email already registered: {}", request.email);
        return Err(ApiError::invalid_operation("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let member = store
        .insert(NewMember {
            name: name.to_string(),
            email: request.email.clone(),
            age: request.age,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // Insert raced another signup for the same address.
            StoreError::DuplicateEmail => {
                ApiError::invalid_operation("Email already registered")
            }
            other => ApiError::from(other),
        })?;

    let token = create_token(member.id, member.email.clone(), member.name.clone())
        .map_err(|e| ApiError::internal(format!("token creation failed: {e}")))?;

    tracing::info!("Member registered: {} ({})", member.name, member.email);

    Ok(Json(AuthResponse {
        token,
        member: member.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::memory::MemoryMemberStore;

    fn request(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            age: 30,
            password: "password123".to_string(),
        }
    }

    fn store() -> Arc<dyn MemberStore> {
        Arc::new(MemoryMemberStore::new())
    }

    #[tokio::test]
    async fn test_signup_success() {
        let store = store();
        let result = signup(State(store.clone()), Json(request("ada@example.com"))).await;
        let response = result.unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.member.email, "ada@example.com");

        let stored = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "password123");
        assert!(stored.friends.is_empty());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let store = store();
        signup(State(store.clone()), Json(request("ada@example.com")))
            .await
            .unwrap();
        let err = signup(State(store), Json(request("ada@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperation { .. }));
    }

    #[tokio::test]
    async fn test_signup_short_password() {
        let mut req = request("ada@example.com");
        req.password = "short".to_string();
        let err = signup(State(store()), Json(req)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperation { .. }));
    }

    #[tokio::test]
    async fn test_signup_invalid_email() {
        let mut req = request("not-an-email");
        req.email = "not-an-email".to_string();
        let err = signup(State(store()), Json(req)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperation { .. }));
    }
}
