//! Session Bridge
//!
//! Resolves the session reference carried by a WebSocket handshake to the
//! member identity established at login. Resolution happens exactly once
//! per connection; everything the router does afterwards trusts this
//! identity and ignores any identity a client might put in a payload.

use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;

/// The identity a live connection acts as.
#[derive(Clone, Debug)]
pub struct BridgedIdentity {
    pub member_id: Uuid,
    pub name: String,
}

/// Resolve a handshake token to an identity.
///
/// Returns `None` for a missing, expired, or forged token. Callers drop
/// such connections silently; no error detail leaves the server.
pub fn resolve_identity(token: &str) -> Option<BridgedIdentity> {
    let claims = match verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("socket handshake token rejected: {e}");
            return None;
        }
    };
    let member_id = Uuid::parse_str(&claims.sub).ok()?;
    Some(BridgedIdentity {
        member_id,
        name: claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;

    #[test]
    fn valid_token_resolves() {
        let member_id = Uuid::new_v4();
        let token = create_token(member_id, "ada@example.com".into(), "Ada".into()).unwrap();

        let identity = resolve_identity(&token).unwrap();
        assert_eq!(identity.member_id, member_id);
        assert_eq!(identity.name, "Ada");
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(resolve_identity("not-a-token").is_none());
    }
}
