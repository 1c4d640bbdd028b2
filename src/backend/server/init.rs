/**
 * Server Initialization
 *
 * This module handles the initialization of the Axum HTTP server: member
 * store selection, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the database (optional; in-memory fallback)
 * 2. Build the application state around the chosen store
 * 3. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::members::memory::MemoryMemberStore;
use crate::backend::members::pg::PgMemberStore;
use crate::backend::members::store::MemberStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application.
///
/// The member store is PostgreSQL when `DATABASE_URL` is configured and
/// reachable; otherwise an in-memory store, which keeps development and CI
/// friction-free at the cost of durability.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Amity backend server");

    let members: Arc<dyn MemberStore> = match load_database().await {
        Some(pool) => Arc::new(PgMemberStore::new(pool)),
        None => {
            tracing::warn!("Member records will not survive a restart");
            Arc::new(MemoryMemberStore::new())
        }
    };

    let app_state = AppState::new(members);

    tracing::info!("Application state initialized");

    create_router(app_state)
}
