//! Filesystem operation errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that can occur while touching the filesystem
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("filesystem operation failed: {operation} on {path} - {message}")]
    FilesystemOperationFailed {
        operation: String,
        path: String,
        message: String,
    },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("permission denied: {operation} on {path} - {message}")]
    PermissionDenied {
        operation: String,
        path: String,
        message: String,
    },
}

impl PlatformError {
    /// Classify an I/O error raised by `operation` on `path`
    #[must_use]
    pub fn from_io(operation: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        let path = path.display().to_string();
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                operation: operation.to_string(),
                path,
                message: err.to_string(),
            }
        } else {
            Self::FilesystemOperationFailed {
                operation: operation.to_string(),
                path,
                message: err.to_string(),
            }
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotADirectory { .. } => {
                Some("Remove or rename the file that occupies the destination directory name.")
            }
            Self::PermissionDenied { .. } => {
                Some("Check ownership and permissions of the session directory.")
            }
            Self::FilesystemOperationFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::FilesystemOperationFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::FilesystemOperationFailed { .. } => "platform.filesystem",
            Self::NotADirectory { .. } => "platform.not_a_directory",
            Self::PermissionDenied { .. } => "platform.permission_denied",
        })
    }
}
