//! Real-Time Event Types
//!
//! The JSON wire format spoken over the `/ws` endpoint. Events are tagged
//! with a `type` field in kebab-case so that clients can dispatch on it
//! without inspecting the payload shape.
//!
//! Client-supplied events never carry the sender's identity; the server
//! attaches the identity resolved at handshake time when it fans a message
//! out. A client cannot speak on behalf of another member.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events a client may send over an established socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Enter the private room shared with `peer_id`. A connection holds at
    /// most one private room at a time; joining another replaces it.
    JoinPrivateRoom { peer_id: Uuid },
    /// Send `text` into the private room shared with `peer_id`.
    SendPrivateMessage { peer_id: Uuid, text: String },
    /// Send `text` into the global room.
    SendGlobalMessage { text: String },
}

/// Events the server delivers to subscribed connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// A message in a private room. Delivered to the other party's
    /// connections only; the sender renders its own message locally.
    PrivateMessage { sender_name: String, text: String },
    /// A message in the global room. Delivered to every global subscriber,
    /// including the sender's own connections.
    GlobalMessage {
        sender_id: Uuid,
        sender_name: String,
        text: String,
    },
}
