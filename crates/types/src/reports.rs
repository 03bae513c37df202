//! Report type definitions for reorganization runs

use crate::frame::{Baseline, Compatibility, FrameCategory, TransferMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Why a frame was not transferred
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Header could not be read
    UnreadableMetadata { message: String },
    /// Header read fine but does not match the baseline
    Incompatible { verdict: Compatibility },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadableMetadata { message } => write!(f, "unreadable header: {message}"),
            Self::Incompatible { verdict } => write!(f, "{verdict}"),
        }
    }
}

/// Per-file outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FrameOutcome {
    Transferred { destination: PathBuf, renamed: bool },
    Skipped { reason: SkipReason },
    Failed { error: String },
}

/// Outcome of one candidate frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub source: PathBuf,
    pub category: FrameCategory,
    pub outcome: FrameOutcome,
}

/// Counts for a single category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub transferred: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Final state of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    /// Finished, but at least one recorded frame was skipped or failed
    PartiallyCompleted,
    Aborted,
}

impl RunStatus {
    /// Process exit code for this status
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Aborted => 1,
            Self::PartiallyCompleted => 2,
        }
    }
}

/// Reorganization report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReorgReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub session_name: String,
    /// Directory holding the four category directories
    pub destination_root: PathBuf,
    pub mode: TransferMode,
    pub validated: bool,
    pub baseline: Option<Baseline>,
    pub frames: Vec<FrameRecord>,
    /// Soft failures that did not stop the run
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl ReorgReport {
    /// Counts for one category
    #[must_use]
    pub fn summary(&self, category: FrameCategory) -> CategorySummary {
        self.frames
            .iter()
            .filter(|record| record.category == category)
            .fold(CategorySummary::default(), |mut acc, record| {
                match &record.outcome {
                    FrameOutcome::Transferred { renamed, .. } => {
                        acc.transferred += 1;
                        if *renamed {
                            acc.renamed += 1;
                        }
                    }
                    FrameOutcome::Skipped { .. } => acc.skipped += 1,
                    FrameOutcome::Failed { .. } => acc.failed += 1,
                }
                acc
            })
    }

    /// Counts across all categories
    #[must_use]
    pub fn totals(&self) -> CategorySummary {
        FrameCategory::ALL
            .iter()
            .map(|category| self.summary(*category))
            .fold(CategorySummary::default(), |acc, s| CategorySummary {
                transferred: acc.transferred + s.transferred,
                renamed: acc.renamed + s.renamed,
                skipped: acc.skipped + s.skipped,
                failed: acc.failed + s.failed,
            })
    }

    /// Name-excluded lights are never recorded, so they do not affect this
    #[must_use]
    pub fn status(&self) -> RunStatus {
        let totals = self.totals();
        if totals.failed > 0 || totals.skipped > 0 {
            RunStatus::PartiallyCompleted
        } else {
            RunStatus::Succeeded
        }
    }
}
