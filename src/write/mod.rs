//! Outcomes produced by the write path for one compaction round.

mod output;
mod status;

pub use output::{CompactionOutput, CompactionResult};
pub use status::WriteStatus;
