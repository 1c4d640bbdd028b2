/**
 * Connection Lifecycle
 *
 * One task per live WebSocket. The task registers the connection with the
 * room registry, forwards its outbound channel to the socket sink, and
 * processes the client's inbound events strictly in arrival order. When
 * the inbound stream ends for any reason - clean close, network drop,
 * protocol error - the task releases every room membership exactly once.
 *
 * Malformed client events are logged and skipped; one bad payload does not
 * cost the client its connection.
 */

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::chat::rooms::{ConnectionId, RoomId, RoomRegistry};
use crate::backend::chat::session::BridgedIdentity;
use crate::shared::event::{ClientEvent, ServerEvent};

/// Drive one authenticated socket until it disconnects.
pub async fn run_connection(socket: WebSocket, identity: BridgedIdentity, rooms: RoomRegistry) {
    let conn_id: ConnectionId = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (outbound, mut inbound) = mpsc::unbounded_channel::<ServerEvent>();

    rooms.register(conn_id, outbound);
    tracing::info!(member = %identity.member_id, connection = %conn_id, "socket connected");

    // Writer: drain the outbound channel into the socket. Events were
    // queued in publish order, so per-sender ordering survives here.
    let writer = tokio::spawn(async move {
        while let Some(event) = inbound.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!("failed to serialize server event: {e}");
                    continue;
                }
            };
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Reader: the connection's own events, processed in the order received.
    while let Some(result) = stream.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(connection = %conn_id, "socket read error: {e}");
                break;
            }
        };
        match message {
            Message::Text(text) => handle_client_event(conn_id, &identity, &rooms, &text),
            Message::Close(_) => break,
            // Ping/pong are answered by the protocol layer; binary frames
            // are not part of the event surface.
            _ => {}
        }
    }

    rooms.leave_all(conn_id);
    writer.abort();
    tracing::info!(member = %identity.member_id, connection = %conn_id, "socket disconnected");
}

/// Dispatch one client event against the room registry.
///
/// The sender identity on every outgoing event comes from the bridged
/// identity, never from the payload.
fn handle_client_event(
    conn_id: ConnectionId,
    identity: &BridgedIdentity,
    rooms: &RoomRegistry,
    raw: &str,
) {
    let event: ClientEvent = match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(connection = %conn_id, "ignoring malformed client event: {e}");
            return;
        }
    };

    match event {
        ClientEvent::JoinPrivateRoom { peer_id } => {
            if peer_id == identity.member_id {
                tracing::debug!(connection = %conn_id, "ignoring self-targeted room join");
                return;
            }
            let room = RoomId::private_pair(identity.member_id, peer_id);
            tracing::debug!(connection = %conn_id, %room, "joining private room");
            rooms.join_private(conn_id, room);
        }
        ClientEvent::SendPrivateMessage { peer_id, text } => {
            let room = RoomId::private_pair(identity.member_id, peer_id);
            rooms.publish(
                &room,
                ServerEvent::PrivateMessage {
                    sender_name: identity.name.clone(),
                    text,
                },
                Some(conn_id),
            );
        }
        ClientEvent::SendGlobalMessage { text } => {
            rooms.publish(
                &RoomId::global(),
                ServerEvent::GlobalMessage {
                    sender_id: identity.member_id,
                    sender_name: identity.name.clone(),
                    text,
                },
                None,
            );
        }
    }
}
