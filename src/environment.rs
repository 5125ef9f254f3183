//! # Environment Classification
//!
//! Decides whether the current deployment environment counts as "secure",
//! which controls whether session cookies are marked `Secure` (HTTPS only).
//!
//! The environment name is read from the `APP_ENV` variable and checked
//! against a fixed allow-list. Unknown or missing names are insecure, so a
//! misconfigured deployment degrades to local-development cookie settings
//! rather than silently shipping `Secure` cookies over plain HTTP.

use std::env;

/// Environment names that are served over HTTPS and get `Secure` cookies.
pub const SECURE_ENVIRONMENTS: [&str; 3] = ["prod", "stage", "test"];

/// Returns `true` iff `environment` names one of the secure environments.
///
/// Matching is exact: `"production"` or `"PROD"` are not secure. No side
/// effects, safe to call repeatedly.
pub fn is_secure(environment: &str) -> bool {
    SECURE_ENVIRONMENTS.contains(&environment)
}

/// Classifies the current process environment by reading `APP_ENV`.
///
/// A missing `APP_ENV` is treated as insecure.
pub fn is_secure_env() -> bool {
    env::var("APP_ENV").map(|name| is_secure(&name)).unwrap_or(false)
}

// The process environment is shared across test threads, so every test that
// reads or writes it must hold this lock.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
