//! Session validation middleware.
//!
//! [`SessionGuard`] holds the registered authorizers and the logger;
//! [`validate_session`] is the middleware function that runs them against the
//! session attached to each request. Mount it behind the session layer with
//! [`axum::middleware::from_fn_with_state`]:
//!
//! ```
//! use axum::{Router, middleware, routing::get};
//! use session_guard::{SessionConfig, SessionGuard, session_layer, validate_session};
//! use tower_sessions::MemoryStore;
//!
//! let config = SessionConfig::from_env().unwrap();
//! let guard = SessionGuard::new();
//!
//! let app: Router = Router::new()
//!     .route("/profile", get(|| async { "private" }))
//!     .route_layer(middleware::from_fn_with_state(guard, validate_session))
//!     .layer(session_layer(&config, MemoryStore::default()));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::authorizer::Authorizer;
use crate::error::GuardError;
use crate::logger::{GuardLogger, LoggerHooks, TracingLogger};

/// Authorizer registry and logger for session validation.
///
/// The guard is assembled once at startup and cloned into the router as
/// state; clones share the registered authorizers and the logger. Nothing is
/// mutated during request handling, so clones need no synchronization.
#[derive(Clone)]
pub struct SessionGuard {
    /// Authorizers in registration order. Validation runs them sequentially
    /// and the first failure wins.
    authorizers: Vec<Arc<dyn Authorizer>>,

    /// Receives a message for every rejected request and for destruction
    /// failures.
    logger: Arc<dyn GuardLogger>,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    /// Creates a guard with no authorizers and the [`TracingLogger`] default.
    ///
    /// With no authorizers registered, every request carrying a session is
    /// forwarded.
    pub fn new() -> Self {
        SessionGuard {
            authorizers: Vec::new(),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replaces the entire authorizer list.
    ///
    /// Replacement, not accumulation: registering twice leaves only the
    /// second list. Call this before cloning the guard into a router.
    pub fn register_authorizers(&mut self, authorizers: Vec<Arc<dyn Authorizer>>) {
        self.authorizers = authorizers;
    }

    /// Replaces the logger with runtime-assembled hooks.
    ///
    /// Fails with [`GuardError::InvalidLogger`] unless both the `info` and
    /// `error` capabilities are present; the previous logger stays active in
    /// that case.
    pub fn set_logger(&mut self, hooks: LoggerHooks) -> Result<(), GuardError> {
        let logger = hooks.into_logger().ok_or(GuardError::InvalidLogger)?;
        self.logger = Arc::new(logger);
        Ok(())
    }

    /// Replaces the logger with a typed [`GuardLogger`] implementation.
    ///
    /// The trait already requires both capabilities, so unlike
    /// [`SessionGuard::set_logger`] this cannot fail.
    pub fn with_logger(mut self, logger: impl GuardLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Runs the registered authorizers against `session` in order.
    ///
    /// Stops at the first failing authorizer; the ones after it are not
    /// evaluated. A failure without a reason is reported as the generic
    /// "Session not valid".
    pub async fn authorize(&self, session: &Session) -> Result<(), GuardError> {
        for authorizer in &self.authorizers {
            let decision = authorizer.authorize(session).await;
            if !decision.valid {
                let reason = decision
                    .reason
                    .unwrap_or_else(|| "Session not valid".to_string());
                return Err(GuardError::AuthorizationFailed(reason));
            }
        }

        Ok(())
    }

    /// Destroys `session`, removing it from the backing store.
    ///
    /// Destruction runs detached: the rejection response is not held back
    /// waiting for the store, and failures are only logged.
    pub fn destroy(&self, session: Session) {
        let logger = Arc::clone(&self.logger);
        tokio::spawn(async move {
            if let Err(e) = session.flush().await {
                logger.error(&format!("Error destroying session: {e}"));
            }
        });
    }

    /// Logs a rejection and destroys the session that caused it, if any.
    fn reject(&self, error: GuardError, session: Option<Session>) -> GuardError {
        self.logger.error(&error.to_string());
        if let Some(session) = session {
            self.destroy(session);
        }
        error
    }
}

/// Middleware gating requests on the outcome of the registered authorizers.
///
/// A request is forwarded downstream only if it carries a session and every
/// authorizer accepts it. Otherwise the request is terminated with status 401
/// and a body of `{"error": "<message>"}`, and the offending session is
/// destroyed. The downstream handler is never invoked for a rejected request.
pub async fn validate_session(
    State(guard): State<SessionGuard>,
    request: Request,
    next: Next,
) -> Result<Response, GuardError> {
    // The session layer attaches a Session to every request it sees; a
    // missing extension means there is no session store in front of us.
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return Err(guard.reject(GuardError::SessionMissing, None));
    };

    if let Err(error) = guard.authorize(&session).await {
        return Err(guard.reject(error, Some(session)));
    }

    Ok(next.run(request).await)
}
