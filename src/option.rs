use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default number of failing partitions described individually in logs.
const DEFAULT_ERROR_SAMPLE_LIMIT: usize = 8;

/// Storage connectivity settings handed to the write-client factory.
///
/// The executor carries these across workers but never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    base_path: Option<String>,
    properties: BTreeMap<String, String>,
}

impl StorageConfig {
    /// Settings rooted at `base_path`.
    pub fn new(base_path: impl Into<String>) -> Self {
        StorageConfig {
            base_path: Some(base_path.into()),
            properties: BTreeMap::new(),
        }
    }

    /// Set one connectivity property, replacing any previous value.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Table base path, if configured.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Look up one property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All properties, ordered by key.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

/// Tuning for how a round is reported. Never changes the commit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactorOptions {
    pub(crate) error_sample_limit: usize,
}

impl Default for CompactorOptions {
    fn default() -> Self {
        CompactorOptions {
            error_sample_limit: DEFAULT_ERROR_SAMPLE_LIMIT,
        }
    }
}

impl CompactorOptions {
    /// Maximum failing partitions logged one by one when a round aborts.
    pub fn error_sample_limit(self, error_sample_limit: usize) -> Self {
        CompactorOptions { error_sample_limit }
    }
}
