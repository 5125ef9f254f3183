//! # Error Handling
//!
//! This module defines the error type for session validation and handles
//! converting it into HTTP responses.
//!
//! Validation follows a fail-closed policy: every fault that occurs while
//! deciding whether a request may proceed is surfaced as a 401 with a JSON
//! body, never as a 5xx, and internal store details are never leaked to the
//! client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Session validation error
///
/// The first three variants are produced while validating a request and are
/// converted into the uniform rejection response. [`GuardError::InvalidLogger`]
/// is returned synchronously from logger injection at startup and never
/// travels the request path.
#[derive(Error, Debug)]
pub enum GuardError {
    /// No session object was attached to the request
    ///
    /// This means the session layer is not mounted in front of the
    /// validation middleware (or the store failed to attach one).
    #[error("Session not found")]
    SessionMissing,

    /// An authorizer rejected the session
    ///
    /// Carries the authorizer's explanatory message when it gave one,
    /// otherwise the generic "Session not valid".
    #[error("{0}")]
    AuthorizationFailed(String),

    /// Session store errors (load/save/delete failures)
    ///
    /// The `#[from]` attribute lets session operations be propagated with
    /// the `?` operator from code that returns [`GuardResult`].
    #[error("Error validating session: {0}")]
    Unexpected(#[from] tower_sessions::session::Error),

    /// Logger injection rejected: the supplied hooks are incomplete
    #[error("Logger must have info and error methods")]
    InvalidLogger,
}

/// Convert GuardError into an HTTP response
///
/// Every rejection uses the same contract: status 401 and a JSON body of the
/// form `{"error": "<message>"}`. Store errors are logged in detail and
/// collapsed to a generic message so internals never reach the client.
impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let error_message = match &self {
            GuardError::Unexpected(e) => {
                // Log detailed error for debugging (not shown to user)
                tracing::error!("session store error: {e}");
                "Session not valid".to_string()
            }
            // For these errors, the message is safe to show to users
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Convenience type alias for Results using GuardError
///
/// Handlers that touch the session can return `GuardResult<T>` and use the
/// `?` operator on session operations; failures become 401 JSON responses.
pub type GuardResult<T> = Result<T, GuardError>;
