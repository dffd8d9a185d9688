use std::io;

use thiserror::Error;

use crate::{
    client::BoxedError,
    timeline::{Instant, InstantParseError},
};

/// Errors that can surface while executing one compaction round.
///
/// None of them leaves a partial commit behind: the instant stays
/// uncommitted and the whole round must be re-run.
#[derive(Debug, Error)]
pub enum CompactionError {
    /// The write path failed with an I/O error before any decision was made.
    #[error("compaction io error: {0}")]
    Io(#[source] io::Error),
    /// One or more partitions reported write errors; the round was not committed.
    #[error("compaction for instant ({instant}) failed with write errors. Errors: {errors}")]
    WriteErrors {
        /// Instant whose round was aborted.
        instant: Instant,
        /// Number of failing partitions (not failed records).
        errors: usize,
    },
    /// The commit call itself failed.
    #[error("compaction commit for instant ({instant}) failed: {source}")]
    Commit {
        /// Instant whose commit failed.
        instant: Instant,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// No write client could be built from the storage configuration.
    #[error("failed to build write client: {0}")]
    Client(#[source] BoxedError),
    /// A caller-supplied instant timestamp could not be parsed.
    #[error(transparent)]
    InvalidInstant(#[from] InstantParseError),
}

impl CompactionError {
    /// `true` when partitions reported write errors. Storage retries will not
    /// help; the round has to be rescheduled.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CompactionError::WriteErrors { .. })
    }

    /// `true` when the failure came from the storage substrate and the same
    /// round may succeed if attempted again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompactionError::Io(_) | CompactionError::Commit { .. }
        )
    }

    /// Borrow the underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CompactionError::Io(err) | CompactionError::Commit { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
