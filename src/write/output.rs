use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::write::WriteStatus;

/// Everything the write path produced for one compaction round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompactionOutput {
    statuses: Vec<WriteStatus>,
    metadata: BTreeMap<String, String>,
}

impl CompactionOutput {
    /// Wrap per-partition statuses, keeping their order.
    pub fn new(statuses: Vec<WriteStatus>) -> Self {
        Self {
            statuses,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach one round-level metadata entry. The executor never reads these.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Per-partition statuses in write-path order.
    pub fn statuses(&self) -> &[WriteStatus] {
        &self.statuses
    }

    /// Opaque round-level metadata.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Number of partitions touched by the round.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// `true` if the round touched no partition.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Statuses whose partition reported errors.
    pub fn failing_statuses(&self) -> impl Iterator<Item = &WriteStatus> {
        self.statuses.iter().filter(|status| status.has_errors())
    }

    /// Derive the aggregate result used to decide commit or abort.
    pub fn result(&self) -> CompactionResult {
        let mut result = CompactionResult {
            total_partitions: self.statuses.len(),
            ..CompactionResult::default()
        };
        for status in &self.statuses {
            if status.has_errors() {
                result.failing_partitions += 1;
            }
            result.total_records = result.total_records.saturating_add(status.total_records());
            result.total_error_records = result
                .total_error_records
                .saturating_add(status.total_error_records());
        }
        result
    }
}

/// Aggregate view of a [`CompactionOutput`]. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionResult {
    /// Partitions touched by the round.
    pub total_partitions: usize,
    /// Partitions whose status reported errors. This alone decides the round.
    pub failing_partitions: usize,
    /// Records attempted across all partitions.
    pub total_records: u64,
    /// Failed records across all partitions (diagnostics only).
    pub total_error_records: u64,
}

impl CompactionResult {
    /// `true` when no partition failed and the round may be committed.
    pub fn is_clean(&self) -> bool {
        self.failing_partitions == 0
    }
}
