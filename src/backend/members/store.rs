/**
 * Member Model and Store Interface
 *
 * This module defines the member record and the storage seam the rest of
 * the backend is written against.
 *
 * # Atomicity Model
 *
 * Each store call is individually atomic on a single member record; no
 * cross-record transaction is assumed. The social graph keeps two records
 * consistent by issuing idempotent conditional set operations in pairs, so
 * every operation is safe to retry and duplicate calls cannot corrupt
 * state.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::profile::MemberProfile;

/// Which relationship set an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationField {
    Friends,
    SentRequests,
    ReceivedRequests,
}

impl RelationField {
    /// Column name in the `members` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::SentRequests => "sent_requests",
            Self::ReceivedRequests => "received_requests",
        }
    }
}

/// A member record as stored.
///
/// The relationship vectors carry set semantics: the store never inserts a
/// duplicate id and never inserts a member's own id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    /// Unique member ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Age in years
    pub age: i32,
    /// Hashed credential (bcrypt); opaque to everything but login
    pub password_hash: String,
    /// Ids of mutual friends
    pub friends: Vec<Uuid>,
    /// Ids this member has sent a pending request to
    pub sent_requests: Vec<Uuid>,
    /// Ids that have sent this member a pending request
    pub received_requests: Vec<Uuid>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn is_friend(&self, other: Uuid) -> bool {
        self.friends.contains(&other)
    }

    pub fn has_sent_request_to(&self, other: Uuid) -> bool {
        self.sent_requests.contains(&other)
    }

    pub fn has_received_request_from(&self, other: Uuid) -> bool {
        self.received_requests.contains(&other)
    }

    /// Public projection, without the credential hash or relationship sets.
    pub fn profile(&self) -> MemberProfile {
        MemberProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

/// Data for a new member; relationship sets start empty.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password_hash: String,
}

/// Member store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Unique-email violation on insert.
    #[error("email already registered")]
    DuplicateEmail,
}

/// Storage seam for member records.
///
/// Every method is individually atomic on one record. `add_to_set` and
/// `remove_from_set` are conditional: they return whether the set actually
/// changed, and calling them again is a no-op, not an error.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Insert a new member with empty relationship sets.
    async fn insert(&self, new: NewMember) -> Result<Member, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError>;

    /// Fetch the members whose ids appear in `ids`. Unknown ids are simply
    /// absent from the result.
    async fn find_many_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Member>, StoreError>;

    /// Every member except `id`, ordered by name.
    async fn list_other_than(&self, id: Uuid) -> Result<Vec<Member>, StoreError>;

    /// Add `value` to the given set of member `id` if absent.
    /// Returns true if the set changed.
    async fn add_to_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError>;

    /// Remove `value` from the given set of member `id` if present.
    /// Returns true if the set changed.
    async fn remove_from_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError>;

    /// Acceptance effect on a single record, applied atomically: add
    /// `other` to `friends` and remove it from both pending sets. The
    /// update is one store operation so a reader can never observe `other`
    /// as both friend and pending on this record.
    async fn apply_acceptance(&self, id: Uuid, other: Uuid) -> Result<(), StoreError>;
}
