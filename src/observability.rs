//! Logging infrastructure for compaction rounds.
//!
//! Events go through `tracing` with target "tonbo_compactor" and always carry
//! an `event` field for filtering.
//!
//! ## Library Integration
//!
//! The crate never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar, or hand a
//! [`tracing::Dispatch`] to an execution context so that a single round logs
//! into it.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (e.g., "compaction")
//! - `instant`: the instant's Display form, on every round event
//! - `attempt`: ULID minted per `execute` call; grep one value to follow a
//!   round from `compaction_started` to its outcome event
//! - `errors` counts failing partitions, `error_records` counts failed records
//! - Use `%` for Display, `?` for Debug formatting

/// Target for all log events emitted by this crate.
pub(crate) const COMPACTOR_TARGET: &str = "tonbo_compactor";

/// Macro for info-level log events.
///
/// # Example
/// ```ignore
/// log_info!(
///     component = "compaction",
///     event = "compaction_started",
///     instant = %instant,
/// );
/// ```
macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::COMPACTOR_TARGET, $($field)*)
    };
}

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::COMPACTOR_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::COMPACTOR_TARGET, $($field)*)
    };
}

/// Macro for error-level log events.
macro_rules! log_error {
    ($($field:tt)*) => {
        ::tracing::error!(target: $crate::observability::COMPACTOR_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_error;
pub(crate) use log_info;
pub(crate) use log_warn;
