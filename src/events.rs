//! Error and log reporting for storefront operations.
//!
//! Operations that swallow transport failures report them through an
//! [`EventSink`] instead. [`TracingEventSink`] forwards to `tracing`; hosts
//! with their own error log can implement the trait.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Hook name for import errors.
pub const IMPORT_ERROR_HOOK: &str = "bigcommerce/import/error";

/// Hook name for generic log events.
pub const LOG_HOOK: &str = "bigcommerce/log";

/// Severity of a log event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Informational messages.
    Info,
    /// Normal but notable conditions.
    Notice,
    /// Recoverable problems.
    Warning,
    /// Failures.
    Error,
}

impl LogLevel {
    /// Returns the lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response metadata attached to an import error.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportErrorContext {
    /// The response body of the failed call.
    pub response: serde_json::Value,
    /// The response headers of the failed call.
    pub headers: HashMap<String, Vec<String>>,
    /// When the failure was observed.
    pub occurred_at: DateTime<Utc>,
}

impl ImportErrorContext {
    /// Creates a context stamped with the current time.
    #[must_use]
    pub fn new(response: serde_json::Value, headers: HashMap<String, Vec<String>>) -> Self {
        Self {
            response,
            headers,
            occurred_at: Utc::now(),
        }
    }
}

/// Receives events from storefront operations.
///
/// Calls are fire-and-forget: sinks must not panic and cannot fail the
/// operation that reports to them.
pub trait EventSink: Send + Sync {
    /// An API call failed with response metadata (the `bigcommerce/import/error` hook).
    fn import_error(&self, message: &str, context: ImportErrorContext);

    /// A free-form log event (the `bigcommerce/log` hook).
    fn log(&self, level: LogLevel, message: &str, context: serde_json::Value);
}

/// An [`EventSink`] that forwards events to `tracing`.
///
/// Import errors are emitted at `ERROR`; log events at the matching level
/// (`NOTICE` maps to `INFO`).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn import_error(&self, message: &str, context: ImportErrorContext) {
        tracing::error!(
            hook = IMPORT_ERROR_HOOK,
            response = %context.response,
            headers = ?context.headers,
            occurred_at = %context.occurred_at,
            "{}",
            message
        );
    }

    fn log(&self, level: LogLevel, message: &str, context: serde_json::Value) {
        match level {
            LogLevel::Debug => {
                tracing::debug!(hook = LOG_HOOK, context = %context, "{}", message);
            }
            LogLevel::Info | LogLevel::Notice => {
                tracing::info!(hook = LOG_HOOK, context = %context, "{}", message);
            }
            LogLevel::Warning => {
                tracing::warn!(hook = LOG_HOOK, context = %context, "{}", message);
            }
            LogLevel::Error => {
                tracing::error!(hook = LOG_HOOK, context = %context, "{}", message);
            }
        }
    }
}
