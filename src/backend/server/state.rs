/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container:
 * - The member store (PostgreSQL or in-memory)
 * - The social graph manager over that store
 * - The room registry that owns all live connections
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and shares its underlying state:
 * - `Arc<dyn MemberStore>` for the store
 * - `SocialGraph` holds the same Arc
 * - `RoomRegistry` is an Arc'd registry internally
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they use, following Axum's recommended pattern.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::chat::rooms::RoomRegistry;
use crate::backend::friends::graph::SocialGraph;
use crate::backend::members::store::MemberStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The member store
    pub members: Arc<dyn MemberStore>,
    /// Friend-request operations over the store
    pub graph: SocialGraph,
    /// Live connections and their room memberships
    pub rooms: RoomRegistry,
}

impl AppState {
    /// Build the state around a member store.
    pub fn new(members: Arc<dyn MemberStore>) -> Self {
        let graph = SocialGraph::new(members.clone());
        Self {
            members,
            graph,
            rooms: RoomRegistry::new(),
        }
    }
}

impl FromRef<AppState> for Arc<dyn MemberStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.members.clone()
    }
}

impl FromRef<AppState> for SocialGraph {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.graph.clone()
    }
}

impl FromRef<AppState> for RoomRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}
