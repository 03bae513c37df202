//! CLI error handling

use std::fmt;

use fitsprep_errors::UserFacingError;
use fitsprep_events::FailureContext;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(fitsprep_errors::ConfigError),
    /// Reorganization aborted
    Reorg(fitsprep_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// The worker running the reorganization did not finish
    Task(String),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Structured form used for JSON output
    pub fn failure(&self) -> FailureContext {
        match self {
            CliError::Config(e) => FailureContext::from_error(e),
            CliError::Reorg(e) => FailureContext::from_error(e),
            CliError::InvalidArguments(_) => FailureContext::new(
                Some("cli.invalid_arguments"),
                self.to_string(),
                None::<String>,
                false,
            ),
            CliError::Task(_) | CliError::Io(_) => {
                FailureContext::new(None::<String>, self.to_string(), None::<String>, false)
            }
        }
    }
}

fn write_user_facing(f: &mut fmt::Formatter<'_>, e: &dyn UserFacingError) -> fmt::Result {
    if let Some(code) = e.user_code() {
        write!(f, "\n  Code: {code}")?;
    }
    if let Some(hint) = e.user_hint() {
        write!(f, "\n  Hint: {hint}")?;
    }
    if e.is_retryable() {
        write!(f, "\n  Retry: safe to retry this operation.")?;
    }
    Ok(())
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {}", e.user_message())?;
                write_user_facing(f, e)
            }
            CliError::Reorg(e) => {
                write!(f, "{}", e.user_message())?;
                write_user_facing(f, e)
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Task(msg) => write!(f, "Reorganization task failed: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Reorg(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fitsprep_errors::ConfigError> for CliError {
    fn from(e: fitsprep_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<fitsprep_errors::Error> for CliError {
    fn from(e: fitsprep_errors::Error) -> Self {
        match e {
            fitsprep_errors::Error::Config(e) => CliError::Config(e),
            other => CliError::Reorg(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
