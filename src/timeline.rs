//! Instant identifiers and lifecycle states.
//!
//! The timeline itself lives outside this crate. These types only describe an
//! instant well enough to name it in requests, errors and logs.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Digits in a second-precision instant timestamp (`yyyyMMddHHmmss`).
const SECOND_PRECISION_LEN: usize = 14;
/// Digits in a millisecond-precision instant timestamp (`yyyyMMddHHmmssSSS`).
const MILLIS_PRECISION_LEN: usize = 17;

/// Errors produced while parsing an [`InstantTime`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantParseError {
    /// Timestamp had an unsupported number of characters.
    #[error("instant timestamp `{0}` must have 14 or 17 digits")]
    Length(String),
    /// Timestamp contained something other than ASCII digits.
    #[error("instant timestamp `{0}` must contain only digits")]
    NonDigit(String),
}

/// Monotonically comparable identifier of one scheduled instant.
///
/// Two timestamps of the same precision compare chronologically. A
/// second-precision timestamp sorts before every millisecond-precision
/// timestamp that shares its prefix.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstantTime(String);

impl InstantTime {
    /// Validate and wrap a raw timestamp.
    pub fn new(raw: impl Into<String>) -> Result<Self, InstantParseError> {
        let raw = raw.into();
        if raw.len() != SECOND_PRECISION_LEN && raw.len() != MILLIS_PRECISION_LEN {
            return Err(InstantParseError::Length(raw));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InstantParseError::NonDigit(raw));
        }
        Ok(Self(raw))
    }

    /// Borrow the raw timestamp.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the timestamp carries a millisecond suffix.
    pub fn has_millis(&self) -> bool {
        self.0.len() == MILLIS_PRECISION_LEN
    }
}

impl FromStr for InstantTime {
    type Err = InstantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for InstantTime {
    type Error = InstantParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstantTime> for String {
    fn from(value: InstantTime) -> Self {
        value.0
    }
}

impl fmt::Display for InstantTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for InstantTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstantTime").field(&self.0).finish()
    }
}

/// Lifecycle state of an instant. Transitions are owned by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstantState {
    /// Planned but not yet picked up.
    Requested,
    /// Picked up for execution.
    Inflight,
    /// Durably committed.
    Completed,
    /// Abandoned; will not be retried under this id.
    Failed,
}

impl InstantState {
    fn as_str(self) -> &'static str {
        match self {
            InstantState::Requested => "REQUESTED",
            InstantState::Inflight => "INFLIGHT",
            InstantState::Completed => "COMPLETED",
            InstantState::Failed => "FAILED",
        }
    }
}

/// Kind of table maintenance an instant stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstantAction {
    /// Rewrites base files together with their delta logs.
    Compaction,
    /// Merges delta logs only, leaving base files untouched.
    LogCompaction,
}

impl InstantAction {
    fn as_str(self) -> &'static str {
        match self {
            InstantAction::Compaction => "compaction",
            InstantAction::LogCompaction => "logcompaction",
        }
    }
}

/// One scheduled unit of table maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instant {
    timestamp: InstantTime,
    action: InstantAction,
    state: InstantState,
}

impl Instant {
    /// Build an instant from its parts.
    pub fn new(timestamp: InstantTime, action: InstantAction, state: InstantState) -> Self {
        Self {
            timestamp,
            action,
            state,
        }
    }

    /// A compaction instant in the `Requested` state.
    pub fn requested(timestamp: InstantTime) -> Self {
        Self::new(timestamp, InstantAction::Compaction, InstantState::Requested)
    }

    /// A compaction instant in the `Inflight` state.
    pub fn inflight(timestamp: InstantTime) -> Self {
        Self::new(timestamp, InstantAction::Compaction, InstantState::Inflight)
    }

    /// Identifier passed to the write client.
    pub fn timestamp(&self) -> &InstantTime {
        &self.timestamp
    }

    /// Maintenance kind.
    pub fn action(&self) -> InstantAction {
        self.action
    }

    /// Lifecycle state as last observed on the timeline.
    pub fn state(&self) -> InstantState {
        self.state
    }

    /// `true` while the instant is being executed.
    pub fn is_inflight(&self) -> bool {
        self.state == InstantState::Inflight
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}__{}__{}]",
            self.timestamp,
            self.action.as_str(),
            self.state.as_str()
        )
    }
}
