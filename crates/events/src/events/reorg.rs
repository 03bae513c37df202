use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::FailureContext;
use fitsprep_types::{FrameCategory, FrameMetadata, SkipReason, TransferMode};

/// Phases of a reorganization run, in the order they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Preflight,
    EstablishingBaseline,
    Provisioning,
    ProcessingLights,
    ProcessingCalibration,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preflight => "preflight",
            Self::EstablishingBaseline => "establishing baseline",
            Self::Provisioning => "provisioning",
            Self::ProcessingLights => "processing lights",
            Self::ProcessingCalibration => "processing calibration",
            Self::Done => "done",
        })
    }
}

/// Events emitted while a session is reorganized
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReorgEvent {
    RunStarted {
        session_root: PathBuf,
        destination_root: PathBuf,
        mode: TransferMode,
        validate: bool,
    },

    PhaseStarted {
        phase: RunPhase,
    },

    BaselineEstablished {
        source: PathBuf,
        metadata: FrameMetadata,
    },

    /// A destination directory exists and is empty
    DirectoryProvisioned {
        path: PathBuf,
        removed_entries: usize,
    },

    /// A source directory for a category is absent
    SourceMissing {
        category: FrameCategory,
        path: PathBuf,
    },

    FrameTransferred {
        category: FrameCategory,
        source: PathBuf,
        destination: PathBuf,
        renamed: bool,
    },

    FrameSkipped {
        category: FrameCategory,
        source: PathBuf,
        reason: SkipReason,
    },

    FrameFailed {
        category: FrameCategory,
        source: PathBuf,
        failure: FailureContext,
    },

    RunCompleted {
        destination_root: PathBuf,
        transferred: usize,
        skipped: usize,
        failed: usize,
        duration_ms: u64,
    },
}
