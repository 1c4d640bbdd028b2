/**
 * Authentication Handler Types
 *
 * Request and response types used by the signup, login, and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::profile::MemberProfile;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Age in years
    pub age: i32,
    /// Password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password (verified against the stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login. Contains the session token and the
/// member's own profile for immediate use.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Session token
    pub token: String,
    /// The authenticated member (no sensitive data)
    pub member: MemberProfile,
}
