//! # Authorizers
//!
//! Caller-supplied predicates that decide, per request, whether the current
//! session grants access. Authorizers are opaque to this crate: they receive
//! the session and answer with a [`Decision`]. They run sequentially in
//! registration order and the first failure wins.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tower_sessions::Session;

/// Outcome of a single authorizer run.
///
/// A failing decision may carry a message explaining the rejection; that
/// message becomes the body of the 401 response. Without one, the client
/// sees the generic "Session not valid".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the session passed this authorizer.
    pub valid: bool,
    /// Explanation for a rejection, shown to the client.
    pub reason: Option<String>,
}

impl Decision {
    /// Decision that lets the request proceed to the next authorizer.
    pub const fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// Rejection carrying a client-visible explanation.
    pub const fn invalid(reason: String) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    /// Rejection without an explanation; the client sees the generic message.
    pub const fn invalid_unexplained() -> Self {
        Self {
            valid: false,
            reason: None,
        }
    }
}

/// An authorization predicate over a session.
///
/// Implementations typically read a few session keys and decide whether the
/// request may proceed. Store failures during those reads should be mapped to
/// a failing [`Decision`] so validation stays fail-closed:
///
/// ```
/// use async_trait::async_trait;
/// use session_guard::{Authorizer, Decision};
/// use tower_sessions::Session;
///
/// #[derive(Debug)]
/// struct RequireUser;
///
/// #[async_trait]
/// impl Authorizer for RequireUser {
///     async fn authorize(&self, session: &Session) -> Decision {
///         match session.get::<String>("user_id").await {
///             Ok(Some(_)) => Decision::valid(),
///             Ok(None) => Decision::invalid("Not authenticated".to_string()),
///             Err(_) => Decision::invalid_unexplained(),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, session: &Session) -> Decision;
}

/// Adapts an async closure into an [`Authorizer`].
///
/// The closure receives its own handle to the session (the handle is cheap to
/// clone and refers to the same underlying record).
///
/// ```
/// use session_guard::{authorizer_fn, Decision};
///
/// let authorizer = authorizer_fn(|session| async move {
///     match session.get::<String>("role").await {
///         Ok(Some(role)) if role == "admin" => Decision::valid(),
///         Ok(_) => Decision::invalid("Admin access required".to_string()),
///         Err(_) => Decision::invalid_unexplained(),
///     }
/// });
/// ```
pub fn authorizer_fn<F, Fut>(f: F) -> Arc<dyn Authorizer>
where
    F: Fn(Session) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Decision> + Send + 'static,
{
    Arc::new(FnAuthorizer(f))
}

struct FnAuthorizer<F>(F);

#[async_trait]
impl<F, Fut> Authorizer for FnAuthorizer<F>
where
    F: Fn(Session) -> Fut + Send + Sync,
    Fut: Future<Output = Decision> + Send,
{
    async fn authorize(&self, session: &Session) -> Decision {
        (self.0)(session.clone()).await
    }
}
