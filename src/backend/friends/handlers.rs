//! Friend System HTTP Handlers
//!
//! The request/response side of the social graph: sending and accepting
//! friend requests, and listing the caller's friends and pending requests
//! hydrated to member profiles.

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
use crate::shared::profile::{ActionResponse, ListFriendsResponse, ListRequestsResponse};

/// POST /api/friends/request/{id} - send a friend request to member {id}.
pub async fn send_friend_request(
    State(graph): State<SocialGraph>,
    auth: AuthMember,
    Path(receiver_id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    graph.send_request(auth.member_id, receiver_id).await?;
    Ok(Json(ActionResponse {
        message: "Friend request sent successfully.".to_string(),
    }))
}

/// POST /api/friends/accept/{id} - accept the request member {id} sent.
pub async fn accept_friend_request(
    State(graph): State<SocialGraph>,
    auth: AuthMember,
    Path(sender_id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    graph.accept_request(auth.member_id, sender_id).await?;
    Ok(Json(ActionResponse {
        message: "Friend request accepted!".to_string(),
    }))
}

/// GET /api/friends - the caller's friends.
pub async fn list_friends(
    State(store): State<Arc<dyn MemberStore>>,
    auth: AuthMember,
) -> Result<Json<ListFriendsResponse>, ApiError> {
    let me = store
        .find_by_id(auth.member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))?;

    let friends = store
        .find_many_by_ids(&me.friends)
        .await?
        .iter()
        .map(|m| m.profile())
        .collect();

    Ok(Json(ListFriendsResponse { friends }))
}

/// GET /api/friends/requests - members whose requests the caller has
/// received and not yet answered.
pub async fn list_friend_requests(
    State(store): State<Arc<dyn MemberStore>>,
    auth: AuthMember,
) -> Result<Json<ListRequestsResponse>, ApiError> {
    let me = store
        .find_by_id(auth.member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))?;

    let requests = store
        .find_many_by_ids(&me.received_requests)
        .await?
        .iter()
        .map(|m| m.profile())
        .collect();

    Ok(Json(ListRequestsResponse { requests }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::memory::MemoryMemberStore;
    use crate::backend::members::store::NewMember;

    struct Fixture {
        store: Arc<dyn MemberStore>,
        graph: SocialGraph,
        ada: Uuid,
        bob: Uuid,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn MemberStore> = Arc::new(MemoryMemberStore::new());
        let mut ids = Vec::new();
        for name in ["Ada", "Bob"] {
            let member = store
                .insert(NewMember {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    age: 30,
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
            ids.push(member.id);
        }
        Fixture {
            graph: SocialGraph::new(store.clone()),
            store,
            ada: ids[0],
            bob: ids[1],
        }
    }

    fn auth_for(id: Uuid) -> AuthMember {
        AuthMember {
            member_id: id,
            name: "whoever".to_string(),
            email: "whoever@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn request_then_accept_through_handlers() {
        let fx = fixture().await;

        send_friend_request(State(fx.graph.clone()), auth_for(fx.ada), Path(fx.bob))
            .await
            .unwrap();

        let pending = list_friend_requests(State(fx.store.clone()), auth_for(fx.bob))
            .await
            .unwrap();
        assert_eq!(pending.requests.len(), 1);
        assert_eq!(pending.requests[0].id, fx.ada);

        accept_friend_request(State(fx.graph.clone()), auth_for(fx.bob), Path(fx.ada))
            .await
            .unwrap();

        let ada_friends = list_friends(State(fx.store.clone()), auth_for(fx.ada))
            .await
            .unwrap();
        let bob_friends = list_friends(State(fx.store.clone()), auth_for(fx.bob))
            .await
            .unwrap();
        assert_eq!(ada_friends.friends[0].id, fx.bob);
        assert_eq!(bob_friends.friends[0].id, fx.ada);

        let pending = list_friend_requests(State(fx.store.clone()), auth_for(fx.bob))
            .await
            .unwrap();
        assert!(pending.requests.is_empty());
    }

    #[tokio::test]
    async fn self_request_rejected_through_handler() {
        let fx = fixture().await;
        let err = send_friend_request(State(fx.graph), auth_for(fx.ada), Path(fx.ada))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperation { .. }));
    }
}
