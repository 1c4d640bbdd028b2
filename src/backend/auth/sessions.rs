/**
 * Session Tokens
 *
 * This module handles session token generation and validation. A token is
 * the opaque session reference handed to clients at login; resolving it
 * yields the member identity without a store round trip.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Member ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Sessions expire after one day.
const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Get the signing secret from the environment.
fn get_session_secret() -> String {
    std::env::var("SESSION_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing SESSION_SECRET ({err}), using development default");
        "development-secret-change-in-production".to_string()
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a session token for a member.
///
/// # Arguments
/// * `member_id` - Member ID
/// * `email` - Member email
/// * `name` - Display name, carried so real-time fan-out can label
///   messages without a store lookup
///
/// # Returns
/// Signed token string
pub fn create_token(
    member_id: Uuid,
    email: String,
    name: String,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();

    let claims = Claims {
        sub: member_id.to_string(),
        email,
        name,
        exp: now + SESSION_TTL_SECS,
        iat: now,
    };

    let secret = get_session_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a session token.
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_session_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token() {
        let member_id = Uuid::new_v4();
        let result = create_token(member_id, "test@example.com".into(), "Test".into());
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_verify_token() {
        let member_id = Uuid::new_v4();
        let token =
            create_token(member_id, "test@example.com".into(), "Test".into()).unwrap();

        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, member_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.name, "Test");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = verify_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let member_id = Uuid::new_v4();
        let token =
            create_token(member_id, "test@example.com".into(), "Test".into()).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(verify_token(&tampered).is_err());
    }
}
