#![deny(missing_docs)]
//! Single-round compaction execution for log-structured tables.
//!
//! A compaction round is identified by an [`Instant`] that an external
//! scheduler has already planned. The [`ExecutionContext`] drives one round:
//! it asks the [`WriteClient`] to rewrite the planned file groups, checks every
//! partition-level [`WriteStatus`], and commits the round only when no
//! partition reported errors. A round is either fully committed or not
//! recorded at all, so a failed instant can be retried from scratch.

/// Structured logging macros shared by the crate.
mod observability;

/// Compaction round execution, errors and counters.
pub mod compaction;

/// Write-client collaborator contracts.
pub mod client;

/// Storage and executor configuration.
pub mod option;

/// Instant identifiers and lifecycle states.
pub mod timeline;

/// Per-partition write outcomes.
pub mod write;


pub use crate::{
    client::{BoxedError, ClientFuture, ExtraMetadata, WriteClient, WriteClientFactory},
    compaction::{
        CompactionCommit, CompactionError, CompactionExecutor, CompactionMetrics,
        CompactionMetricsSnapshot, ExecutionContext,
    },
    option::{CompactorOptions, StorageConfig},
    timeline::{Instant, InstantAction, InstantParseError, InstantState, InstantTime},
    write::{CompactionOutput, CompactionResult, WriteStatus},
};
