//! Compaction round execution.
//!
//! A round either commits every rewritten file group or records nothing, so
//! the instant stays eligible for a full retry.

/// Compaction errors.
mod error;
/// Executor configuration and the per-context round driver.
mod executor;
/// Round outcome counters.
mod metrics;

pub use error::CompactionError;
pub use executor::{CompactionCommit, CompactionExecutor, ExecutionContext};
pub use metrics::{CompactionMetrics, CompactionMetricsSnapshot};
