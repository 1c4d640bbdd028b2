//! Member Directory Handlers
//!
//! HTTP handlers for browsing members and viewing a profile. The profile
//! response carries the caller's relationship view so the client can offer
//! the right action: send a request, accept one, or open the private chat.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::friends::graph::SocialGraph;
use crate::backend::members::store::MemberStore;
use crate::backend::middleware::auth::AuthMember;
use crate::shared::profile::{ListMembersResponse, ProfileResponse};

/// GET /api/members - every member except the caller.
pub async fn list_members(
    State(store): State<Arc<dyn MemberStore>>,
    auth: AuthMember,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let members = store
        .list_other_than(auth.member_id)
        .await?
        .iter()
        .map(|m| m.profile())
        .collect();

    Ok(Json(ListMembersResponse { members }))
}

/// GET /api/members/{id} - one member's profile plus the caller's
/// relationship to them.
pub async fn get_member_profile(
    State(store): State<Arc<dyn MemberStore>>,
    auth: AuthMember,
    Path(member_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let other = store
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))?;
    let me = store
        .find_by_id(auth.member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))?;

    let relationship = SocialGraph::relationship_view(&me, &other);

    Ok(Json(ProfileResponse {
        member: other.profile(),
        relationship,
    }))
}
