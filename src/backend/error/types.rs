/**
 * Backend Error Types
 *
 * This module defines the error taxonomy surfaced by the HTTP handlers and
 * the social graph manager.
 *
 * # Error Categories
 *
 * - `Unauthenticated` - no valid session token; the request is rejected
 *   before any core logic runs
 * - `NotFound` - a referenced member (or pending request) does not exist
 * - `InvalidOperation` - a self-targeting request or accept
 * - `Store` - the member store failed; surfaced as a 500
 *
 * Idempotent duplicates (re-sending a request, re-accepting one) are not
 * errors; those operations succeed silently as no-ops.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::members::store::StoreError;

/// Errors surfaced by API handlers and the social graph manager.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid authenticated identity accompanied the request.
    #[error("authentication required")]
    Unauthenticated,

    /// A referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// What was looked up ("member", "friend request", ...)
        entity: String,
    },

    /// The operation is malformed regardless of state, e.g. self-targeting.
    #[error("{message}")]
    InvalidOperation {
        /// Human-readable reason
        message: String,
    },

    /// The member store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything else that should read as a server fault.
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a `NotFound` error for the named entity.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create an `InvalidOperation` error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map the error to its HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidOperation { .. } => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed in the response body.
    ///
    /// Server faults are collapsed to a generic message; the detail goes to
    /// the log, not the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal { .. } => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
