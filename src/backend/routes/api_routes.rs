/**
 * API Route Handlers
 *
 * Route configuration for the JSON API: authentication, the member
 * directory, and the friend system.
 *
 * # Authentication
 *
 * `/api/auth/signup` and `/api/auth/login` are public. Every other route
 * requires a session token in the `Authorization` header; the `AuthMember`
 * extractor rejects unauthenticated calls before handler logic runs.
 */

use axum::Router;

use crate::backend::auth::{get_me, login, signup};
use crate::backend::friends::handlers::{
    accept_friend_request, list_friend_requests, list_friends, send_friend_request,
};
use crate::backend::members::handlers::{get_member_profile, list_members};
use crate::backend::server::state::AppState;

/// Configure API routes.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", axum::routing::get(get_me))
        // Member directory
        .route("/api/members", axum::routing::get(list_members))
        .route("/api/members/{member_id}", axum::routing::get(get_member_profile))
        // Friend system
        .route("/api/friends", axum::routing::get(list_friends))
        .route(
            "/api/friends/requests",
            axum::routing::get(list_friend_requests),
        )
        .route(
            "/api/friends/request/{receiver_id}",
            axum::routing::post(send_friend_request),
        )
        .route(
            "/api/friends/accept/{sender_id}",
            axum::routing::post(accept_friend_request),
        )
}
