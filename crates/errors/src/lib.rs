#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for fitsprep
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone so per-file failures can be recorded in
//! run reports and forwarded through the event channel.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod fits;
pub mod platform;
pub mod reorg;

// Re-export all error types at the root
pub use config::ConfigError;
pub use fits::FitsError;
pub use platform::PlatformError;
pub use reorg::ReorgError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("fits error: {0}")]
    Fits(#[from] FitsError),

    #[error("{0}")]
    Reorg(#[from] ReorgError),
}

impl Error {
    /// Whether this error ends the whole run rather than a single file
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Reorg(err) => err.is_fatal(),
            Error::Fits(_) => false,
            _ => true,
        }
    }
}

/// Result type alias for fitsprep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(err) => err.user_message(),
            Error::Platform(err) => err.user_message(),
            Error::Fits(err) => err.user_message(),
            Error::Reorg(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_hint(),
            Error::Platform(err) => err.user_hint(),
            Error::Fits(err) => err.user_hint(),
            Error::Reorg(err) => err.user_hint(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Platform(err) => err.is_retryable(),
            Error::Reorg(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
            Error::Fits(err) => err.user_code(),
            Error::Reorg(err) => err.user_code(),
        }
    }
}
