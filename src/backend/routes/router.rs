/**
 * Router Configuration
 *
 * The main router creation function that combines all route configurations
 * into a single Axum router.
 *
 * # Route Order
 *
 * 1. WebSocket endpoint (`/ws`)
 * 2. API routes (auth, members, friends)
 * 3. Fallback handler (404)
 */

use axum::Router;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured.
///
/// # Route Details
///
/// ## Real-time
///
/// - `GET /ws` - WebSocket upgrade carrying the session token
///
/// ## API Routes
///
/// - `POST /api/auth/signup` - Member registration
/// - `POST /api/auth/login` - Member login
/// - `GET /api/auth/me` - Current member
/// - `GET /api/members` - Member directory
/// - `GET /api/members/{id}` - Profile with relationship view
/// - `GET /api/friends` - Friend list
/// - `GET /api/friends/requests` - Received friend requests
/// - `POST /api/friends/request/{id}` - Send friend request
/// - `POST /api/friends/accept/{id}` - Accept friend request
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route(
        "/ws",
        axum::routing::get({
            use crate::backend::chat::handlers::handle_socket_upgrade;
            handle_socket_upgrade
        }),
    );

    let router = configure_api_routes(router);

    let router = router.fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
