//! # session-guard
//!
//! Session-validation middleware for [axum] applications on top of
//! [tower-sessions].
//!
//! The crate does two things:
//! - **Creation**: [`session_layer`] assembles the cookie-backed session
//!   layer with a fixed security profile (signed cookie, `HttpOnly`,
//!   `SameSite=Strict`, environment-driven `Secure` flag).
//! - **Validation**: [`validate_session`] gates protected routes by running a
//!   caller-supplied chain of [`Authorizer`] predicates against the request's
//!   session, forwarding the request when all of them pass and answering
//!   `401 {"error": "<message>"}` otherwise. Rejected sessions are destroyed.
//!
//! Session persistence stays external: bring any
//! [`SessionStore`](tower_sessions::SessionStore) implementation.
//!
//! ## Example
//! ```rust,no_run
//! use axum::{Router, middleware, routing::get};
//! use session_guard::{Decision, SessionConfig, SessionGuard, authorizer_fn};
//! use tower_sessions::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SessionConfig::from_env()?;
//!
//!     let mut guard = SessionGuard::new();
//!     guard.register_authorizers(vec![authorizer_fn(|session| async move {
//!         match session.get::<String>("user_id").await {
//!             Ok(Some(_)) => Decision::valid(),
//!             Ok(None) => Decision::invalid("Not authenticated".to_string()),
//!             Err(_) => Decision::invalid_unexplained(),
//!         }
//!     })]);
//!
//!     let app = Router::new()
//!         .route("/profile", get(|| async { "private" }))
//!         .route_layer(middleware::from_fn_with_state(
//!             guard,
//!             session_guard::validate_session,
//!         ))
//!         .layer(session_guard::session_layer(&config, MemoryStore::default()));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! [axum]: https://docs.rs/axum
//! [tower-sessions]: https://docs.rs/tower-sessions

pub mod authorizer; // Authorization predicates and their result type
pub mod config; // Configuration management (environment variables, durations)
pub mod environment; // Deployment environment classification
pub mod error; // Error handling and the 401 rejection contract
pub mod layer; // Session store layer and cookie profile
pub mod logger; // Pluggable logging (tracing default, runtime hooks)
pub mod middleware; // Request interceptors (session validation)

pub use authorizer::{Authorizer, Decision, authorizer_fn};
pub use config::{SessionConfig, cookie_duration_ms};
pub use environment::{SECURE_ENVIRONMENTS, is_secure, is_secure_env};
pub use error::{GuardError, GuardResult};
pub use layer::{SESSION_COOKIE_NAME, session_layer, session_layer_from_env};
pub use logger::{GuardLogger, LogFn, LoggerHooks, TracingLogger};
pub use middleware::validate::{SessionGuard, validate_session};
