//! # Logger Injection
//!
//! Validation failures are reported through a pluggable logger with two
//! capabilities, `info` and `error`. The default forwards to [`tracing`], so
//! a host that already has a subscriber installed gets guard logs for free.
//!
//! Hosts bridging a foreign logging facility at runtime supply [`LoggerHooks`];
//! the hooks are checked for completeness when injected, and incomplete hooks
//! are rejected without disturbing the active logger.

use std::sync::Arc;

/// The two logging capabilities the session guard relies on.
pub trait GuardLogger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default logger, forwarding both capabilities to [`tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GuardLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// A logging callback accepting a formatted message.
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Runtime-assembled logger hooks.
///
/// Both hooks must be present for injection to succeed; see
/// [`SessionGuard::set_logger`](crate::SessionGuard::set_logger).
///
/// ```
/// use session_guard::LoggerHooks;
///
/// let hooks = LoggerHooks::new()
///     .with_info(|message| println!("INFO {message}"))
///     .with_error(|message| eprintln!("ERROR {message}"));
/// assert!(hooks.is_complete());
/// ```
#[derive(Clone, Default)]
pub struct LoggerHooks {
    info: Option<LogFn>,
    error: Option<LogFn>,
}

impl LoggerHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `info` capability.
    pub fn with_info(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.info = Some(Arc::new(hook));
        self
    }

    /// Sets the `error` capability.
    pub fn with_error(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.error = Some(Arc::new(hook));
        self
    }

    /// Whether both required capabilities are present.
    pub fn is_complete(&self) -> bool {
        self.info.is_some() && self.error.is_some()
    }

    /// Assembles the hooks into a logger, or `None` if a capability is missing.
    pub(crate) fn into_logger(self) -> Option<HookLogger> {
        match (self.info, self.error) {
            (Some(info), Some(error)) => Some(HookLogger { info, error }),
            _ => None,
        }
    }
}

/// Logger backed by a complete pair of hooks.
pub(crate) struct HookLogger {
    info: LogFn,
    error: LogFn,
}

impl GuardLogger for HookLogger {
    fn info(&self, message: &str) {
        (self.info)(message)
    }

    fn error(&self, message: &str) {
        (self.error)(message)
    }
}
