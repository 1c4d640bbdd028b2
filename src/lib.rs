//! Amity - Main Library
//!
//! Amity is a social networking backend built with Rust. Members register,
//! discover one another, form mutual friendships through a request/accept
//! handshake, and exchange real-time text messages over WebSockets, either
//! in a single global room or in private one-to-one rooms derived from a
//! pair of member identities.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - WebSocket event types (client and server sides of the wire)
//!   - Member profile projections and relationship views
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with WebSocket chat routing
//!   - Social graph management (friend requests, acceptance, views)
//!   - Member store over PostgreSQL or in-memory
//!   - Authentication (bcrypt credentials, signed session tokens)

pub mod shared;
pub mod backend;
