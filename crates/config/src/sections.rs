//! Configuration sections

use crate::constants;
use fitsprep_types::{ColorChoice, FrameCategory, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub default_output: OutputFormat,
    #[serde(default)]
    pub color: ColorChoice,
}

/// Destination directory names, one named field per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_lights")]
    pub lights: String,
    #[serde(default = "default_darks")]
    pub darks: String,
    #[serde(default = "default_flats")]
    pub flats: String,
    #[serde(default = "default_bias")]
    pub bias: String,
    /// Write under `<root>/<staging_dir>/<session>` instead of `<root>`
    #[serde(default = "default_staged")]
    pub staged: bool,
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lights: default_lights(),
            darks: default_darks(),
            flats: default_flats(),
            bias: default_bias(),
            staged: default_staged(),
            staging_dir: default_staging_dir(),
        }
    }
}

impl LayoutConfig {
    /// Destination directory name for a category
    #[must_use]
    pub fn dir_name(&self, category: FrameCategory) -> &str {
        match category {
            FrameCategory::Light => &self.lights,
            FrameCategory::Dark => &self.darks,
            FrameCategory::Flat => &self.flats,
            FrameCategory::Bias => &self.bias,
        }
    }

    /// All destination directory names, lights first
    #[must_use]
    pub fn dir_names(&self) -> [&str; 4] {
        FrameCategory::ALL.map(|category| self.dir_name(category))
    }

    /// Directory that receives the category directories for a session
    #[must_use]
    pub fn destination_root(&self, session_root: &Path, session_name: &str) -> PathBuf {
        if self.staged {
            session_root.join(&self.staging_dir).join(session_name)
        } else {
            session_root.to_path_buf()
        }
    }
}

/// Where the capture software puts its frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_calibration_root")]
    pub calibration_root: String,
    #[serde(default = "default_dark_source")]
    pub dark: String,
    #[serde(default = "default_flat_source")]
    pub flat: String,
    #[serde(default = "default_bias_source")]
    pub bias: String,
    /// Frame file extension, matched case-sensitively
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            calibration_root: default_calibration_root(),
            dark: default_dark_source(),
            flat: default_flat_source(),
            bias: default_bias_source(),
            extension: default_extension(),
        }
    }
}

impl SourceConfig {
    /// Source directory for a calibration category; lights are passed on the command line
    #[must_use]
    pub fn category_dir(&self, category: FrameCategory) -> Option<&str> {
        match category {
            FrameCategory::Light => None,
            FrameCategory::Dark => Some(&self.dark),
            FrameCategory::Flat => Some(&self.flat),
            FrameCategory::Bias => Some(&self.bias),
        }
    }
}

/// Metadata validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Check calibration frames against the first readable light frame
    #[serde(default = "default_validation_enabled")]
    pub enabled: bool,
    /// Treat a missing lights directory as fatal even without validation
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: default_validation_enabled(),
            strict: default_strict(),
        }
    }
}

// Default value functions for serde
fn default_lights() -> String {
    constants::LIGHTS_DIR.to_string()
}

fn default_darks() -> String {
    constants::DARKS_DIR.to_string()
}

fn default_flats() -> String {
    constants::FLATS_DIR.to_string()
}

fn default_bias() -> String {
    constants::BIASES_DIR.to_string()
}

fn default_staged() -> bool {
    true
}

fn default_staging_dir() -> String {
    constants::STAGING_DIR.to_string()
}

fn default_calibration_root() -> String {
    constants::CALIBRATION_ROOT.to_string()
}

fn default_dark_source() -> String {
    constants::DARK_SOURCE_DIR.to_string()
}

fn default_flat_source() -> String {
    constants::FLAT_SOURCE_DIR.to_string()
}

fn default_bias_source() -> String {
    constants::BIAS_SOURCE_DIR.to_string()
}

fn default_extension() -> String {
    constants::FRAME_EXTENSION.to_string()
}

fn default_validation_enabled() -> bool {
    true
}

fn default_strict() -> bool {
    false
}
