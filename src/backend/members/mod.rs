//! Member Records and the Member Store
//!
//! A member is a registered identity plus three relationship sets:
//! `friends`, `sent_requests`, and `received_requests`. The store exposes
//! atomic conditional set operations on those fields; everything the social
//! graph guarantees is built from them.
//!
//! Two store implementations exist: `PgMemberStore` (PostgreSQL via sqlx,
//! uuid[] columns) and `MemoryMemberStore` (in-process, used in tests and
//! when no database is configured).

pub mod store;
pub mod pg;
pub mod memory;
pub mod handlers;

pub use memory::MemoryMemberStore;
pub use pg::PgMemberStore;
pub use store::{Member, MemberStore, NewMember, RelationField, StoreError};
