/**
 * Room Identifiers and the Room Registry
 *
 * A room is nothing but an identifier plus the set of live connections
 * currently subscribed to it. The registry owns that mapping: join, leave,
 * and publish all take the same lock, so a fan-out always sees a coherent
 * membership snapshot and never delivers to a connection mid-removal.
 *
 * # Rooms
 *
 * - The global room has the well-known constant id.
 * - A private room id is derived from the unordered pair of member ids by
 *   sorting and joining them, so both parties derive the same id no matter
 *   who computes it.
 *
 * # Delivery
 *
 * Each connection registers an unbounded outbound channel. Publishing
 * clones the event into every subscribed connection's channel; the
 * connection's writer task drains it to the socket. A channel whose
 * receiver is gone is skipped silently - disconnection is never an error
 * for the other participants, and an in-flight fan-out is never unwound.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::event::ServerEvent;

/// Identifies one live connection for the registry's lifetime.
pub type ConnectionId = Uuid;

/// Outbound channel feeding one connection's socket writer.
pub type Outbound = mpsc::UnboundedSender<ServerEvent>;

/// Well-known id of the single global room.
pub const GLOBAL_ROOM: &str = "global";

/// A logical room identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// The global room.
    pub fn global() -> Self {
        RoomId(GLOBAL_ROOM.to_string())
    }

    /// The private room shared by two members.
    ///
    /// The two ids are sorted before joining, so
    /// `private_pair(a, b) == private_pair(b, a)` and each unordered pair
    /// maps to exactly one room.
    pub fn private_pair(a: Uuid, b: Uuid) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        RoomId(format!("{lo}:{hi}"))
    }

    pub fn is_private(&self) -> bool {
        self.0 != GLOBAL_ROOM
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct RegistryInner {
    /// Room id -> subscribed connections and their outbound channels.
    rooms: HashMap<RoomId, HashMap<ConnectionId, Outbound>>,
    /// Connection -> rooms it belongs to. Kept in lockstep with `rooms`.
    subscriptions: HashMap<ConnectionId, HashSet<RoomId>>,
    /// Connection -> its outbound channel, for later joins.
    connections: HashMap<ConnectionId, Outbound>,
}

impl RegistryInner {
    fn join(&mut self, conn: ConnectionId, room: RoomId) {
        let Some(outbound) = self.connections.get(&conn).cloned() else {
            tracing::warn!(%conn, %room, "join from unregistered connection ignored");
            return;
        };
        self.rooms.entry(room.clone()).or_default().insert(conn, outbound);
        self.subscriptions.entry(conn).or_default().insert(room);
    }

    fn leave(&mut self, conn: ConnectionId, room: &RoomId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&conn);
            if members.is_empty() {
                // Rooms only exist while someone is in them.
                self.rooms.remove(room);
            }
        }
        if let Some(subs) = self.subscriptions.get_mut(&conn) {
            subs.remove(room);
        }
    }
}

/// Registry of live connections and their room memberships.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and subscribe it to the global room.
    ///
    /// Every live connection is a global-room subscriber for its whole
    /// lifetime; private rooms come and go per chat view.
    pub fn register(&self, conn: ConnectionId, outbound: Outbound) {
        let mut inner = self.inner.lock().unwrap();
        inner.connections.insert(conn, outbound);
        inner.join(conn, RoomId::global());
        tracing::debug!(%conn, "connection registered");
    }

    /// Subscribe the connection to a room. Joining a room it is already in
    /// is a no-op.
    pub fn join(&self, conn: ConnectionId, room: RoomId) {
        let mut inner = self.inner.lock().unwrap();
        inner.join(conn, room);
    }

    /// Subscribe the connection to a private room, leaving whichever
    /// private room it was in before. A connection holds at most one
    /// private subscription at a time.
    pub fn join_private(&self, conn: ConnectionId, room: RoomId) {
        let mut inner = self.inner.lock().unwrap();
        let previous: Vec<RoomId> = inner
            .subscriptions
            .get(&conn)
            .map(|subs| {
                subs.iter()
                    .filter(|r| r.is_private() && **r != room)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        for old in previous {
            inner.leave(conn, &old);
        }
        inner.join(conn, room);
    }

    /// Unsubscribe the connection from a room.
    pub fn leave(&self, conn: ConnectionId, room: &RoomId) {
        let mut inner = self.inner.lock().unwrap();
        inner.leave(conn, room);
    }

    /// Drop every subscription the connection holds and forget it.
    ///
    /// Idempotent: a second call for the same connection finds nothing and
    /// does nothing, so duplicate disconnect notifications are harmless.
    pub fn leave_all(&self, conn: ConnectionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.connections.remove(&conn);
        let rooms: Vec<RoomId> = inner
            .subscriptions
            .remove(&conn)
            .map(|subs| subs.into_iter().collect())
            .unwrap_or_default();
        for room in &rooms {
            if let Some(members) = inner.rooms.get_mut(room) {
                members.remove(&conn);
                if members.is_empty() {
                    inner.rooms.remove(room);
                }
            }
        }
        if !rooms.is_empty() {
            tracing::debug!(%conn, rooms = rooms.len(), "connection left all rooms");
        }
    }

    /// Deliver `event` to every connection subscribed to `room`, except
    /// `exclude` if given.
    ///
    /// The membership snapshot is taken and delivered under the registry
    /// lock: connections joining concurrently do not receive this message,
    /// and ones leaving concurrently are not half-delivered to. Publishing
    /// to an empty room is a normal no-op.
    ///
    /// Returns the number of connections the event was queued for.
    pub fn publish(
        &self,
        room: &RoomId,
        event: ServerEvent,
        exclude: Option<ConnectionId>,
    ) -> usize {
        let inner = self.inner.lock().unwrap();
        let Some(members) = inner.rooms.get(room) else {
            tracing::debug!(%room, "publish to empty room");
            return 0;
        };

        let mut delivered = 0;
        for (conn, outbound) in members {
            if Some(*conn) == exclude {
                continue;
            }
            // A closed channel means the peer is tearing down; skip it and
            // keep delivering to the rest.
            if outbound.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        tracing::debug!(%room, delivered, "event published");
        delivered
    }

    /// Number of connections currently subscribed to `room`.
    pub fn subscriber_count(&self, room: &RoomId) -> usize {
        self.inner
            .lock()
            .unwrap()
            .rooms
            .get(room)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// The rooms a connection is subscribed to.
    pub fn subscriptions(&self, conn: ConnectionId) -> Vec<RoomId> {
        self.inner
            .lock()
            .unwrap()
            .subscriptions
            .get(&conn)
            .map(|subs| subs.iter().cloned().collect())
            .unwrap_or_default()
    }
}
