//! # Session Layer Assembly
//!
//! Builds the `tower-sessions` layer that persists sessions and attaches a
//! [`Session`](tower_sessions::Session) to every request. The cookie profile
//! is fixed by design: signed, `HttpOnly`, `SameSite=Strict`, scoped to the
//! configured domain, with `Secure` controlled by the environment classifier.
//!
//! The backing store stays the host's choice; anything implementing
//! [`SessionStore`] works.

use anyhow::Result;
use sha2::{Digest, Sha512};
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{Key, SameSite, time::Duration},
    service::SignedCookie,
};

use crate::config::SessionConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session_cookie";

/// Builds the session layer for the given configuration and backing store.
///
/// The cookie carries the session id, signed with a key derived from
/// `config.secret`. Sessions expire after `config.cookie_duration_ms` of
/// inactivity. Unmodified sessions are never persisted, so the store only
/// sees clients that actually established a session.
pub fn session_layer<S: SessionStore>(
    config: &SessionConfig,
    store: S,
) -> SessionManagerLayer<S, SignedCookie> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_domain(config.cookie_domain.clone())
        .with_secure(config.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(Duration::milliseconds(
            config.cookie_duration_ms,
        )))
        .with_always_save(false)
        .with_signed(signing_key(&config.secret))
}

/// Builds the session layer from environment variables.
///
/// Convenience for hosts that don't need to inspect or adjust the
/// configuration; equivalent to [`SessionConfig::from_env`] followed by
/// [`session_layer`].
pub fn session_layer_from_env<S: SessionStore>(
    store: S,
) -> Result<SessionManagerLayer<S, SignedCookie>> {
    let config = SessionConfig::from_env()?;
    Ok(session_layer(&config, store))
}

/// Derives the cookie signing key from the configured secret.
///
/// `Key::from` requires 64 bytes of key material, so the secret is stretched
/// with SHA-512 first. The derivation is deterministic: every process
/// configured with the same secret validates the same cookies.
fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
