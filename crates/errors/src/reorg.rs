//! Session reorganization error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ReorgError {
    #[error("session directory not found: {path}")]
    SessionRootMissing { path: String },

    #[error("lights directory not found: {path}")]
    LightsDirMissing { path: String },

    #[error("no light frame with readable metadata found in {path}")]
    NoBaseline { path: String },

    #[error("lights directory {path} overlaps destination {destination}")]
    SourceOverlapsDestination { path: String, destination: String },

    #[error("cannot determine a session name for {path}")]
    SessionNameUnavailable { path: String },

    #[error("failed to transfer {source_path} to {destination}: {message}")]
    TransferFailed {
        source_path: String,
        destination: String,
        message: String,
    },
}

impl ReorgError {
    /// Per-file transfer failures are recorded and the run continues
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::TransferFailed { .. })
    }
}

impl UserFacingError for ReorgError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SessionRootMissing { .. } => Some("Check the session directory argument."),
            Self::LightsDirMissing { .. } => {
                Some("Pass the name of the subdirectory holding the light frames.")
            }
            Self::NoBaseline { .. } => Some(
                "No light frame has a readable FITS header; use --no-validate to skip validation.",
            ),
            Self::SourceOverlapsDestination { .. } => Some(
                "Provisioning would empty the light frames; use the staged layout or move the lights elsewhere.",
            ),
            Self::SessionNameUnavailable { .. } => Some("Pass --session-name explicitly."),
            Self::TransferFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::TransferFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::SessionRootMissing { .. } => "reorg.session_root_missing",
            Self::LightsDirMissing { .. } => "reorg.lights_dir_missing",
            Self::NoBaseline { .. } => "reorg.no_baseline",
            Self::SourceOverlapsDestination { .. } => "reorg.source_overlaps_destination",
            Self::SessionNameUnavailable { .. } => "reorg.session_name_unavailable",
            Self::TransferFailed { .. } => "reorg.transfer_failed",
        })
    }
}
