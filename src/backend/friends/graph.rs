//! Social Graph Manager
//!
//! The friend-request state machine over the member store. Relationship
//! state lives on two independent member records; this module keeps them
//! consistent without any cross-record transaction by only ever issuing
//! idempotent conditional set operations, in pairs.
//!
//! State for a pair (A, B):
//! - strangers: neither record references the other
//! - pending: B in A.sent_requests and A in B.received_requests
//! - friends: each lists the other in `friends`, nothing pending
//!
//! Re-running any operation converges on the same state, which is what
//! resolves concurrent duplicate clicks, client retries, and a crash
//! between the two record updates: the retry repairs the half-applied
//! state instead of erroring on it.

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::members::store::{Member, MemberStore, RelationField};
use crate::shared::profile::RelationshipView;

/// Friend-request operations over a member store.
#[derive(Clone)]
pub struct SocialGraph {
    store: Arc<dyn MemberStore>,
}

impl SocialGraph {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Send a friend request from `sender` to `receiver`.
    ///
    /// Adds `receiver` to the sender's `sent_requests` and `sender` to the
    /// receiver's `received_requests`. Both updates are conditional
    /// set-adds, so re-sending is a silent no-op. Sending to someone who
    /// has already sent a request the other way is allowed; the
    /// relationship view surfaces that state as an accept affordance.
    ///
    /// # Errors
    ///
    /// * `InvalidOperation` - sender and receiver are the same member
    /// * `NotFound` - receiver does not exist
    pub async fn send_request(&self, sender: Uuid, receiver: Uuid) -> Result<(), ApiError> {
        if sender == receiver {
            return Err(ApiError::invalid_operation(
                "cannot send a friend request to yourself",
            ));
        }

        let receiver_member = self
            .store
            .find_by_id(receiver)
            .await?
            .ok_or_else(|| ApiError::not_found("member"))?;

        // Already friends: nothing to request. Keeps a pair from being
        // simultaneously friends and pending.
        if receiver_member.is_friend(sender) {
            tracing::debug!(%sender, %receiver, "request skipped, already friends");
            return Ok(());
        }

        self.store
            .add_to_set(sender, RelationField::SentRequests, receiver)
            .await?;
        self.store
            .add_to_set(receiver, RelationField::ReceivedRequests, sender)
            .await?;

        tracing::info!(%sender, %receiver, "friend request sent");
        Ok(())
    }

    /// Accept the friend request `sender` previously sent to `acceptor`.
    ///
    /// Establishes the mutual friendship and clears the pending mirror in
    /// both directions on both records. Accepting an already-accepted
    /// request is a silent no-op; accepting when no request (and no trace
    /// of a half-applied acceptance) exists fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// * `InvalidOperation` - acceptor and sender are the same member
    /// * `NotFound` - sender does not exist, or there is nothing to accept
    pub async fn accept_request(&self, acceptor: Uuid, sender: Uuid) -> Result<(), ApiError> {
        if acceptor == sender {
            return Err(ApiError::invalid_operation(
                "cannot accept a friend request from yourself",
            ));
        }

        let sender_member = self
            .store
            .find_by_id(sender)
            .await?
            .ok_or_else(|| ApiError::not_found("member"))?;
        let acceptor_member = self
            .store
            .find_by_id(acceptor)
            .await?
            .ok_or_else(|| ApiError::not_found("member"))?;

        if acceptor_member.is_friend(sender) && sender_member.is_friend(acceptor) {
            tracing::debug!(%acceptor, %sender, "accept skipped, already friends");
            return Ok(());
        }

        // A pending entry on either record is enough to proceed, and so is
        // a one-sided friendship: that is the retry path after a crash
        // between the two record updates, and re-applying repairs it.
        let pending = acceptor_member.has_received_request_from(sender)
            || sender_member.has_sent_request_to(acceptor);
        let partial =
            acceptor_member.is_friend(sender) || sender_member.is_friend(acceptor);
        if !pending && !partial {
            return Err(ApiError::not_found("friend request"));
        }

        // Per-record compound updates: each record flips from pending to
        // friend in a single atomic store call. Clears the symmetric
        // pending entries too, in case both sides had requested.
        self.store.apply_acceptance(acceptor, sender).await?;
        self.store.apply_acceptance(sender, acceptor).await?;

        tracing::info!(%acceptor, %sender, "friend request accepted");
        Ok(())
    }

    /// How `me` relates to `other`, for the profile page affordance.
    ///
    /// Pure read. Checks both records so that a half-applied state still
    /// maps to the nearest sensible view. An incoming request wins over an
    /// outgoing one: if both exist the page should offer "accept".
    pub fn relationship_view(me: &Member, other: &Member) -> RelationshipView {
        if me.is_friend(other.id) || other.is_friend(me.id) {
            RelationshipView::Friends
        } else if me.has_received_request_from(other.id) || other.has_sent_request_to(me.id) {
            RelationshipView::RequestSentToMe
        } else if me.has_sent_request_to(other.id) || other.has_received_request_from(me.id) {
            RelationshipView::RequestSentByMe
        } else {
            RelationshipView::Strangers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::memory::MemoryMemberStore;
    use crate::backend::members::store::NewMember;

    async fn graph_with_members(names: &[&str]) -> (SocialGraph, Vec<Member>) {
        let store = Arc::new(MemoryMemberStore::new());
        let mut members = Vec::new();
        for name in names {
            let member = store
                .insert(NewMember {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    age: 25,
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
            members.push(member);
        }
        (SocialGraph::new(store.clone()), members)
    }

    async fn reload(graph: &SocialGraph, id: Uuid) -> Member {
        graph.store.find_by_id(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn send_request_mirrors_pending_state() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(ada.sent_requests, vec![b]);
        assert_eq!(bob.received_requests, vec![a]);
        assert!(ada.friends.is_empty());
        assert!(bob.friends.is_empty());
    }

    #[tokio::test]
    async fn send_request_twice_equals_once() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();
        graph.send_request(a, b).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(ada.sent_requests, vec![b]);
        assert_eq!(bob.received_requests, vec![a]);
    }

    #[tokio::test]
    async fn send_request_to_self_rejected() {
        let (graph, members) = graph_with_members(&["Ada"]).await;
        let a = members[0].id;
        let err = graph.send_request(a, a).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOperation { .. }));
    }

    #[tokio::test]
    async fn send_request_to_unknown_member_is_not_found() {
        let (graph, members) = graph_with_members(&["Ada"]).await;
        let err = graph
            .send_request(members[0].id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn accept_establishes_symmetric_friendship() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();
        graph.accept_request(b, a).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(ada.friends, vec![b]);
        assert_eq!(bob.friends, vec![a]);
        assert!(ada.sent_requests.is_empty());
        assert!(ada.received_requests.is_empty());
        assert!(bob.sent_requests.is_empty());
        assert!(bob.received_requests.is_empty());
    }

    #[tokio::test]
    async fn accept_twice_is_silent_noop() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();
        graph.accept_request(b, a).await.unwrap();
        graph.accept_request(b, a).await.unwrap();

        let ada = reload(&graph, a).await;
        assert_eq!(ada.friends, vec![b]);
    }

    #[tokio::test]
    async fn accept_without_request_is_not_found() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let err = graph
            .accept_request(members[1].id, members[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn crossed_requests_resolve_cleanly_on_accept() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        // Both sides request before either accepts.
        graph.send_request(a, b).await.unwrap();
        graph.send_request(b, a).await.unwrap();
        graph.accept_request(b, a).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(ada.friends, vec![b]);
        assert_eq!(bob.friends, vec![a]);
        assert!(ada.sent_requests.is_empty());
        assert!(ada.received_requests.is_empty());
        assert!(bob.sent_requests.is_empty());
        assert!(bob.received_requests.is_empty());
    }

    #[tokio::test]
    async fn send_after_friendship_stays_clean() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();
        graph.accept_request(b, a).await.unwrap();
        graph.send_request(a, b).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(ada.friends, vec![b]);
        assert!(ada.sent_requests.is_empty());
        assert!(bob.received_requests.is_empty());
    }

    #[tokio::test]
    async fn relationship_views_cover_all_states() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(
            SocialGraph::relationship_view(&ada, &bob),
            RelationshipView::Strangers
        );

        graph.send_request(a, b).await.unwrap();
        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(
            SocialGraph::relationship_view(&ada, &bob),
            RelationshipView::RequestSentByMe
        );
        assert_eq!(
            SocialGraph::relationship_view(&bob, &ada),
            RelationshipView::RequestSentToMe
        );

        graph.accept_request(b, a).await.unwrap();
        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        assert_eq!(
            SocialGraph::relationship_view(&ada, &bob),
            RelationshipView::Friends
        );
        assert_eq!(
            SocialGraph::relationship_view(&bob, &ada),
            RelationshipView::Friends
        );
    }

    #[tokio::test]
    async fn incoming_request_wins_over_outgoing_in_view() {
        let (graph, members) = graph_with_members(&["Ada", "Bob"]).await;
        let (a, b) = (members[0].id, members[1].id);

        graph.send_request(a, b).await.unwrap();
        graph.send_request(b, a).await.unwrap();

        let ada = reload(&graph, a).await;
        let bob = reload(&graph, b).await;
        // Each side sees an incoming request and should be offered accept.
        assert_eq!(
            SocialGraph::relationship_view(&ada, &bob),
            RelationshipView::RequestSentToMe
        );
        assert_eq!(
            SocialGraph::relationship_view(&bob, &ada),
            RelationshipView::RequestSentToMe
        );
    }
}
