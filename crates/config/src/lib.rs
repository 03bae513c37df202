#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for fitsprep
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/fitsprep/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod sections;

pub use sections::{GeneralConfig, LayoutConfig, SourceConfig, ValidationConfig};

use fitsprep_errors::{ConfigError, Error};
use fitsprep_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist; the default location may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(output) = std::env::var("FITSPREP_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => return Err(invalid_env("FITSPREP_OUTPUT", output)),
            };
        }

        if let Ok(color) = std::env::var("FITSPREP_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => return Err(invalid_env("FITSPREP_COLOR", color)),
            };
        }

        if let Ok(validate) = std::env::var("FITSPREP_VALIDATE") {
            self.validation.enabled =
                parse_bool(&validate).ok_or_else(|| invalid_env("FITSPREP_VALIDATE", validate))?;
        }

        if let Ok(strict) = std::env::var("FITSPREP_STRICT") {
            self.validation.strict =
                parse_bool(&strict).ok_or_else(|| invalid_env("FITSPREP_STRICT", strict))?;
        }

        if let Ok(layout) = std::env::var("FITSPREP_LAYOUT") {
            self.layout.staged = match layout.as_str() {
                "staged" => true,
                "flat" => false,
                _ => return Err(invalid_env("FITSPREP_LAYOUT", layout)),
            };
        }

        Ok(())
    }

    /// Check directory names before anything touches the filesystem
    ///
    /// # Errors
    ///
    /// Returns an error if a directory name is empty, is not a single path
    /// component, if two categories share a destination directory, or if a
    /// destination directory would shadow the calibration sources or the
    /// staging directory.
    pub fn validate(&self) -> Result<(), Error> {
        let layout = &self.layout;
        let named = [
            ("layout.lights", layout.lights.as_str()),
            ("layout.darks", layout.darks.as_str()),
            ("layout.flats", layout.flats.as_str()),
            ("layout.bias", layout.bias.as_str()),
            ("layout.staging_dir", layout.staging_dir.as_str()),
            ("source.calibration_root", self.source.calibration_root.as_str()),
            ("source.dark", self.source.dark.as_str()),
            ("source.flat", self.source.flat.as_str()),
            ("source.bias", self.source.bias.as_str()),
        ];
        for (field, value) in named {
            if !is_single_component(value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        if self.source.extension.is_empty() || self.source.extension.contains('.') {
            return Err(ConfigError::InvalidValue {
                field: "source.extension".to_string(),
                value: self.source.extension.clone(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for name in layout.dir_names() {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateDirectory {
                    name: name.to_string(),
                }
                .into());
            }
        }

        let reserved = if layout.staged {
            vec![("source.calibration_root", self.source.calibration_root.as_str())]
        } else {
            vec![
                ("source.calibration_root", self.source.calibration_root.as_str()),
                ("layout.staging_dir", layout.staging_dir.as_str()),
            ]
        };
        let destinations = if layout.staged {
            vec![layout.staging_dir.as_str()]
        } else {
            layout.dir_names().to_vec()
        };
        for name in destinations {
            if let Some((field, _)) = reserved.iter().find(|(_, value)| *value == name) {
                return Err(ConfigError::ReservedDirectory {
                    name: name.to_string(),
                    field: (*field).to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn invalid_env(field: &str, value: String) -> Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value,
    }
    .into()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn is_single_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}
