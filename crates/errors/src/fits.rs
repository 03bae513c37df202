//! FITS header reading errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FitsError {
    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("invalid FITS format in {path}: {message}")]
    InvalidFormat { path: String, message: String },

    #[error("header of {path} has no END card within {blocks} blocks")]
    HeaderTooLong { path: String, blocks: usize },
}

impl UserFacingError for FitsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("The frame is skipped; re-export it from the capture software if it is needed.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Unreadable { .. } => "fits.unreadable",
            Self::InvalidFormat { .. } => "fits.invalid_format",
            Self::HeaderTooLong { .. } => "fits.header_too_long",
        })
    }
}
