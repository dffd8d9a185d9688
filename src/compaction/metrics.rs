//! Compaction round counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of compaction round counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionMetricsSnapshot {
    /// Rounds that committed.
    pub rounds_committed: u64,
    /// Rounds aborted because partitions reported write errors.
    pub rounds_aborted: u64,
    /// Rounds whose compact call failed with an I/O error.
    pub io_failures: u64,
    /// Rounds whose commit call failed.
    pub commit_failures: u64,
    /// Failing partitions observed across aborted rounds.
    pub failing_partitions: u64,
    /// Partitions committed across successful rounds.
    pub partitions_committed: u64,
}

/// Shared compaction round counters.
#[derive(Debug, Default)]
pub struct CompactionMetrics {
    rounds_committed: AtomicU64,
    rounds_aborted: AtomicU64,
    io_failures: AtomicU64,
    commit_failures: AtomicU64,
    failing_partitions: AtomicU64,
    partitions_committed: AtomicU64,
}

impl CompactionMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot all counters.
    pub fn snapshot(&self) -> CompactionMetricsSnapshot {
        CompactionMetricsSnapshot {
            rounds_committed: self.rounds_committed.load(Ordering::Relaxed),
            rounds_aborted: self.rounds_aborted.load(Ordering::Relaxed),
            io_failures: self.io_failures.load(Ordering::Relaxed),
            commit_failures: self.commit_failures.load(Ordering::Relaxed),
            failing_partitions: self.failing_partitions.load(Ordering::Relaxed),
            partitions_committed: self.partitions_committed.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_committed(&self, partitions: usize) {
        add_saturating(&self.rounds_committed, 1);
        add_saturating(&self.partitions_committed, partitions as u64);
    }

    pub(crate) fn record_aborted(&self, failing_partitions: usize) {
        add_saturating(&self.rounds_aborted, 1);
        add_saturating(&self.failing_partitions, failing_partitions as u64);
    }

    pub(crate) fn record_io_failure(&self) {
        add_saturating(&self.io_failures, 1);
    }

    pub(crate) fn record_commit_failure(&self) {
        add_saturating(&self.commit_failures, 1);
    }
}

fn add_saturating(counter: &AtomicU64, delta: u64) {
    if delta == 0 {
        return;
    }
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(delta))
    });
}
