//! In-Memory Member Store
//!
//! A `HashMap` behind an `RwLock`, mirroring the conditional set semantics
//! of the PostgreSQL store. Used by the test suite and as the fallback when
//! no `DATABASE_URL` is configured, so the server still comes up in
//! development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::store::{Member, MemberStore, NewMember, RelationField, StoreError};

/// Member store held entirely in process memory.
#[derive(Default)]
pub struct MemoryMemberStore {
    members: RwLock<HashMap<Uuid, Member>>,
}

impl MemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_mut(member: &mut Member, field: RelationField) -> &mut Vec<Uuid> {
    match field {
        RelationField::Friends => &mut member.friends,
        RelationField::SentRequests => &mut member.sent_requests,
        RelationField::ReceivedRequests => &mut member.received_requests,
    }
}

/// Set-add on a Vec: push only when absent.
fn set_add(set: &mut Vec<Uuid>, value: Uuid) -> bool {
    if set.contains(&value) {
        false
    } else {
        set.push(value);
        true
    }
}

/// Set-remove on a Vec: retain everything else.
fn set_remove(set: &mut Vec<Uuid>, value: Uuid) -> bool {
    let before = set.len();
    set.retain(|id| *id != value);
    set.len() != before
}

#[async_trait]
impl MemberStore for MemoryMemberStore {
    async fn insert(&self, new: NewMember) -> Result<Member, StoreError> {
        let mut members = self.members.write().unwrap();
        if members.values().any(|m| m.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let member = Member {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            age: new.age,
            password_hash: new.password_hash,
            friends: Vec::new(),
            sent_requests: Vec::new(),
            received_requests: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, StoreError> {
        Ok(self.members.read().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        Ok(self
            .members
            .read()
            .unwrap()
            .values()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn find_many_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Member>, StoreError> {
        let members = self.members.read().unwrap();
        let mut found: Vec<Member> = ids
            .iter()
            .filter_map(|id| members.get(id).cloned())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn list_other_than(&self, id: Uuid) -> Result<Vec<Member>, StoreError> {
        let members = self.members.read().unwrap();
        let mut others: Vec<Member> = members
            .values()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        others.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(others)
    }

    async fn add_to_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError> {
        let mut members = self.members.write().unwrap();
        Ok(members
            .get_mut(&id)
            .map(|m| set_add(field_mut(m, field), value))
            .unwrap_or(false))
    }

    async fn remove_from_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError> {
        let mut members = self.members.write().unwrap();
        Ok(members
            .get_mut(&id)
            .map(|m| set_remove(field_mut(m, field), value))
            .unwrap_or(false))
    }

    async fn apply_acceptance(&self, id: Uuid, other: Uuid) -> Result<(), StoreError> {
        let mut members = self.members.write().unwrap();
        if let Some(m) = members.get_mut(&id) {
            set_add(&mut m.friends, other);
            set_remove(&mut m.sent_requests, other);
            set_remove(&mut m.received_requests, other);
        }
        Ok(())
    }
}
