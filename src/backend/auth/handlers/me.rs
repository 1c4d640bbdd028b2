/**
 * Get Current Member Handler
 *
 * GET /api/auth/me - returns the authenticated member's own profile.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::error::ApiError;
use crate::backend::members::store::MemberStore;
use crate::backend::middleware::auth::AuthMember;
use crate::shared::profile::MemberProfile;

/// Get current member handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid session token
/// * `404 Not Found` - the token's member no longer exists
pub async fn get_me(
    State(store): State<Arc<dyn MemberStore>>,
    auth: AuthMember,
) -> Result<Json<MemberProfile>, ApiError> {
    let member = store
        .find_by_id(auth.member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))?;

    Ok(Json(member.profile()))
}
