//! Real-Time Chat
//!
//! The WebSocket side of the server: the session bridge that binds a
//! socket to an authenticated member, the room router that owns which
//! connections hear which messages, and the per-connection lifecycle task.
//!
//! The social graph never appears here. A chat identity is just a member
//! id; the two subsystems compose only through it.

pub mod rooms;
pub mod session;
pub mod connection;
pub mod handlers;

pub use rooms::{RoomId, RoomRegistry};
pub use session::BridgedIdentity;
