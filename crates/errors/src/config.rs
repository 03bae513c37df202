//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("invalid config: {message}")]
    Invalid { message: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("duplicate destination directory name: {name}")]
    DuplicateDirectory { name: String },

    #[error("destination directory {name} is also used as {field}")]
    ReservedDirectory { name: String, field: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Pass an existing file to --config or omit the flag to use defaults.")
            }
            Self::InvalidValue { .. } | Self::Invalid { .. } | Self::ParseError { .. } => {
                Some("Fix the configuration value and retry the command.")
            }
            Self::DuplicateDirectory { .. } => {
                Some("Give every frame category its own directory name under [layout].")
            }
            Self::ReservedDirectory { .. } => Some(
                "Provisioning empties destination directories; rename the [layout] entry so it does not shadow a source or staging directory.",
            ),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotFound { .. } => "config.not_found",
            Self::Invalid { .. } => "config.invalid",
            Self::ParseError { .. } => "config.parse",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::DuplicateDirectory { .. } => "config.duplicate_directory",
            Self::ReservedDirectory { .. } => "config.reserved_directory",
        })
    }
}
