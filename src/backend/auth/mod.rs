//! Authentication
//!
//! Credential verification (bcrypt) and session token issuance/validation
//! (signed JWTs). The token issued at login is the session reference every
//! later request and WebSocket handshake carries; the rest of the backend
//! only ever sees the resolved member identity.

pub mod sessions;
pub mod handlers;

pub use handlers::{login, signup, get_me};
