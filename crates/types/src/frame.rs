//! Frame classification and header metadata types

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Category of an imaging frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameCategory {
    Light,
    Dark,
    Flat,
    Bias,
}

impl FrameCategory {
    /// Every category, lights first
    pub const ALL: [Self; 4] = [Self::Light, Self::Dark, Self::Flat, Self::Bias];

    /// Calibration categories in processing order
    pub const CALIBRATION: [Self; 3] = [Self::Dark, Self::Flat, Self::Bias];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Flat => "flat",
            Self::Bias => "bias",
        }
    }

    #[must_use]
    pub fn is_calibration(self) -> bool {
        !matches!(self, Self::Light)
    }
}

impl fmt::Display for FrameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy or move semantics for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Copy contents, permissions and timestamps; sources stay in place
    #[default]
    Copy,
    /// Rename into the destination, falling back to copy + delete
    Move,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Move => f.write_str("move"),
        }
    }
}

/// A file discovered under a session tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFrame {
    pub path: PathBuf,
    pub category: FrameCategory,
    /// Basename exactly as found on disk, not necessarily UTF-8
    pub file_name: OsString,
}

impl CandidateFrame {
    /// Build a candidate from a path; `None` when the path has no file name
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, category: FrameCategory) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_os_string();
        Some(Self {
            path,
            category,
            file_name,
        })
    }
}

/// Header fields used for validation
///
/// Every field is optional: `None` means the keyword was absent or could not
/// be interpreted, which is distinct from a legitimate zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Exposure time in seconds
    pub exposure: Option<f64>,
    /// Gain, or ISO for DSLR frames
    pub gain: Option<f64>,
    /// Pixel width (`NAXIS1`)
    pub width: Option<u64>,
    /// Pixel height (`NAXIS2`)
    pub height: Option<u64>,
}

/// Header field named in a compatibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataField {
    Exposure,
    Width,
    Height,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exposure => f.write_str("exposure"),
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// Result of comparing a calibration frame against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Compatibility {
    Compatible,
    /// A required field is absent on the candidate or on the baseline
    MissingField { field: MetadataField },
    DimensionMismatch {
        expected: (u64, u64),
        found: (u64, u64),
    },
    ExposureMismatch { expected: f64, found: f64 },
}

impl Compatibility {
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible)
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => f.write_str("compatible"),
            Self::MissingField { field } => write!(f, "missing {field}"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "dimensions {}x{} do not match baseline {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::ExposureMismatch { expected, found } => {
                write!(f, "exposure {found}s does not match baseline {expected}s")
            }
        }
    }
}

/// Metadata of the first readable light frame of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Light frame the metadata was read from
    pub source: PathBuf,
    pub metadata: FrameMetadata,
}
