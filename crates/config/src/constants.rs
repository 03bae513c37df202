//! Session layout names shared by the configuration defaults
//!
//! The destination names follow the layout Siril's preprocessing scripts
//! expect. They are defaults only; every one can be overridden in the
//! `[layout]` and `[source]` tables.

pub const LIGHTS_DIR: &str = "lights";
pub const DARKS_DIR: &str = "darks";
pub const FLATS_DIR: &str = "flats";
pub const BIASES_DIR: &str = "biases";

/// Parent of the per-session destination in the staged layout
pub const STAGING_DIR: &str = "siril-ready";

/// Capture software writes calibration frames under this directory
pub const CALIBRATION_ROOT: &str = "CALI_FRAME";
pub const DARK_SOURCE_DIR: &str = "dark";
pub const FLAT_SOURCE_DIR: &str = "flat";
pub const BIAS_SOURCE_DIR: &str = "bias";

pub const FRAME_EXTENSION: &str = "fits";

pub const CONFIG_DIR_NAME: &str = "fitsprep";
pub const CONFIG_FILE_NAME: &str = "config.toml";
