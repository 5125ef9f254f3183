//! # Configuration Management
//!
//! This module handles loading session configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `SESSION_SECRET`: Secret the session cookie is signed with (default: "secret")
//! - `COOKIE_DOMAIN`: Domain attribute of the session cookie (default: localhost)
//! - `SESSION_DURATION_HOURS`: Cookie max-age in hours (default: 1)
//! - `APP_ENV`: Deployment environment name, used for the cookie `Secure` flag

use anyhow::Result;
use std::env;

use crate::environment::is_secure_env;

/// Milliseconds per hour, the unit conversion behind cookie max-age.
const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Converts a cookie duration in hours to milliseconds.
///
/// No validation is performed: a negative input yields a negative duration,
/// which is the caller's responsibility to avoid.
///
/// ```
/// assert_eq!(session_guard::cookie_duration_ms(2), 7_200_000);
/// ```
pub const fn cookie_duration_ms(hours: i64) -> i64 {
    hours * MILLIS_PER_HOUR
}

/// Session layer configuration
///
/// This struct holds all values needed to assemble the session cookie layer.
/// Everything is read once at construction time and never re-read per request.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to sign the session cookie.
    ///
    /// The default `"secret"` exists so local development works out of the
    /// box. Any real deployment must set `SESSION_SECRET`.
    pub secret: String,

    /// Domain attribute written on the session cookie
    /// For local development: "localhost"
    /// For production: your site's domain, e.g. "example.com"
    pub cookie_domain: String,

    /// Cookie max-age in milliseconds
    /// Default: one hour
    pub cookie_duration_ms: i64,

    /// Whether the cookie is marked `Secure` (sent over HTTPS only)
    /// Derived from `APP_ENV`, see [`crate::environment`]
    pub secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from a .env file (if present) using dotenvy
    /// 2. Reads each configuration value from the environment
    /// 3. Falls back to local-development defaults if variables aren't set
    /// 4. Returns an error if parsing fails (e.g. a non-numeric duration)
    ///
    /// ## Example .env file
    /// ```text
    /// SESSION_SECRET=change-me
    /// COOKIE_DOMAIN=example.com
    /// SESSION_DURATION_HOURS=1
    /// APP_ENV=prod
    /// ```
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (dotenvy doesn't error if file missing)
        dotenvy::dotenv().ok();

        let secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set, falling back to the default secret");
            "secret".to_string()
        });

        // Cookie duration in hours, converted to the milliseconds the cookie
        // layer works with. The ? operator propagates parse errors.
        let duration_hours: i64 = env::var("SESSION_DURATION_HOURS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()?;

        Ok(SessionConfig {
            secret,

            // Cookie domain - must match where the app is served from
            cookie_domain: env::var("COOKIE_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),

            cookie_duration_ms: cookie_duration_ms(duration_hours),

            // Secure cookies only in environments served over HTTPS
            secure: is_secure_env(),
        })
    }

    /// Override the cookie duration, given in hours.
    ///
    /// Example: `config.with_cookie_duration_hours(24)` for day-long sessions.
    pub fn with_cookie_duration_hours(mut self, hours: i64) -> Self {
        self.cookie_duration_ms = cookie_duration_ms(hours);
        self
    }
}
