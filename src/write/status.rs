use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of rewriting one partition during a compaction round.
///
/// Built by the write path with the consuming `record_*` methods and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WriteStatus {
    partition_path: String,
    file_id: Option<String>,
    total_records: u64,
    failed_records: BTreeMap<String, String>,
    global_error: Option<String>,
}

impl WriteStatus {
    /// Empty status for `partition_path`.
    pub fn new(partition_path: impl Into<String>) -> Self {
        Self {
            partition_path: partition_path.into(),
            ..Self::default()
        }
    }

    /// Attach the file group id the partition was rewritten into.
    pub fn with_file_id(self, file_id: impl Into<String>) -> Self {
        WriteStatus {
            file_id: Some(file_id.into()),
            ..self
        }
    }

    /// Count `records` successfully written records.
    pub fn record_success(self, records: u64) -> Self {
        WriteStatus {
            total_records: self.total_records.saturating_add(records),
            ..self
        }
    }

    /// Record a failed write for `record_key`.
    ///
    /// A key that fails twice keeps the latest message and is counted once.
    pub fn record_failure(
        mut self,
        record_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        if self
            .failed_records
            .insert(record_key.into(), message.into())
            .is_none()
        {
            self.total_records = self.total_records.saturating_add(1);
        }
        self
    }

    /// Mark the whole partition as failed, independent of individual records.
    pub fn with_global_error(self, message: impl Into<String>) -> Self {
        WriteStatus {
            global_error: Some(message.into()),
            ..self
        }
    }

    /// `true` if any record failed or the partition carries a global error.
    pub fn has_errors(&self) -> bool {
        self.global_error.is_some() || !self.failed_records.is_empty()
    }

    /// Partition this status describes.
    pub fn partition_path(&self) -> &str {
        &self.partition_path
    }

    /// File group id written for the partition, if known.
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// Records attempted, successful or not.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Number of distinct records that failed.
    pub fn total_error_records(&self) -> u64 {
        self.failed_records.len() as u64
    }

    /// Failed record keys with their error messages, ordered by key.
    pub fn failed_records(&self) -> &BTreeMap<String, String> {
        &self.failed_records
    }

    /// Partition-wide failure, if any.
    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }
}
