/**
 * WebSocket Handler
 *
 * GET /ws?token=<session token> - upgrade to the real-time event surface.
 *
 * The session token travels as a query parameter because browsers cannot
 * set headers on a WebSocket handshake. The bridge resolves it before the
 * upgrade completes; a connection without a valid token is upgraded and
 * then closed immediately, with no error payload, so the handshake leaks
 * nothing about why it was dropped.
 */

use axum::{
    extract::{ws::WebSocketUpgrade, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::backend::chat::connection::run_connection;
use crate::backend::chat::session::resolve_identity;
use crate::backend::server::state::AppState;

/// Query parameters for the WebSocket handshake.
#[derive(Debug, Deserialize)]
pub struct SocketQuery {
    pub token: Option<String>,
}

/// Handle a WebSocket upgrade request.
pub async fn handle_socket_upgrade(
    State(app_state): State<AppState>,
    Query(query): Query<SocketQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let identity = query.token.as_deref().and_then(resolve_identity);

    ws.on_upgrade(move |socket| async move {
        match identity {
            Some(identity) => run_connection(socket, identity, app_state.rooms.clone()).await,
            None => {
                // Dropping the socket closes it without a word.
                tracing::debug!("unauthenticated socket dropped");
            }
        }
    })
}
