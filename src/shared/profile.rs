//! Member Profiles and Relationship Views
//!
//! Public projections of a member record. A `MemberProfile` is what the API
//! returns for directory listings, friend lists, and profile pages; it never
//! carries the credential hash or the raw relationship sets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member as seen by other members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// How the viewing member relates to another member.
///
/// Drives the action affordance on a profile page: `Strangers` offers
/// "send request", `RequestSentToMe` offers "accept", `Friends` offers the
/// private chat link, and `RequestSentByMe` disables the send button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipView {
    Strangers,
    RequestSentByMe,
    RequestSentToMe,
    Friends,
}

/// Profile page payload: the member plus the caller's relationship to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub member: MemberProfile,
    pub relationship: RelationshipView,
}

/// Directory listing (`GET /api/members`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMembersResponse {
    pub members: Vec<MemberProfile>,
}

/// Friend listing (`GET /api/friends`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFriendsResponse {
    pub friends: Vec<MemberProfile>,
}

/// Received friend requests, hydrated to sender profiles
/// (`GET /api/friends/requests`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequestsResponse {
    pub requests: Vec<MemberProfile>,
}

/// Outcome message for the friend-request mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_view_serializes_kebab_case() {
        let json = serde_json::to_value(RelationshipView::RequestSentToMe).unwrap();
        assert_eq!(json, "request-sent-to-me");
        let json = serde_json::to_value(RelationshipView::Strangers).unwrap();
        assert_eq!(json, "strangers");
    }
}
