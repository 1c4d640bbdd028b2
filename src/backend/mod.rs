//! Backend Module
//!
//! This module contains all server-side code for the Amity application:
//! an Axum HTTP server exposing a JSON API for the social graph and a
//! WebSocket endpoint for real-time chat.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credentials, session tokens, signup/login handlers
//! - **`middleware`** - The authenticated-member extractor
//! - **`members`** - Member records and the member store (Postgres / memory)
//! - **`friends`** - The social graph manager and its handlers
//! - **`chat`** - Session bridge, room router, connection lifecycle
//! - **`error`** - Backend error types
//!
//! # State Management
//!
//! `AppState` holds the member store, the social graph manager, and the
//! room registry. All three are cheap clones over shared state, so every
//! handler and every connection task sees the same world.
//!
//! # Consistency Model
//!
//! Friend state lives on two independent member records with no
//! cross-record transaction. All mutations are idempotent conditional set
//! operations, so any operation can be retried and concurrent duplicates
//! converge instead of corrupting state.
//!
//! # Real-time Model
//!
//! One process owns all live connections. The room registry maps room ids
//! to the outbound channels of subscribed connections; membership changes
//! and publishes are serialized by the registry lock, so each fan-out
//! delivers to a coherent snapshot.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and session tokens
pub mod auth;

/// Request middleware
pub mod middleware;

/// Member records and storage
pub mod members;

/// Friend request state machine
pub mod friends;

/// Real-time chat routing
pub mod chat;

/// Backend error types
pub mod error;

pub use chat::{RoomId, RoomRegistry};
pub use error::ApiError;
pub use friends::SocialGraph;
pub use server::{create_app, AppState};
