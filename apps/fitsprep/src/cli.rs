//! Command line interface definition

use clap::Parser;
use fitsprep_types::ColorChoice;
use std::path::PathBuf;

/// fitsprep - Reorganize FITS imaging sessions into Siril's directory layout
#[derive(Parser)]
#[command(name = "fitsprep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reorganize FITS imaging sessions into Siril's directory layout")]
#[command(long_about = None)]
pub struct Cli {
    /// Session directory
    pub directory: PathBuf,

    /// Subdirectory of the session holding the light frames
    #[arg(default_value = ".")]
    pub lights_dir: PathBuf,

    /// Move frames instead of copying them
    #[arg(long = "move")]
    pub move_files: bool,

    /// Skip header validation of calibration frames
    #[arg(long)]
    pub no_validate: bool,

    /// Abort when the lights directory is missing, even without validation
    #[arg(long)]
    pub strict: bool,

    /// Write category directories directly into the session directory
    #[arg(long)]
    pub flat_layout: bool,

    /// Name of the staged session directory (defaults to the session directory name)
    #[arg(long, value_name = "NAME")]
    pub session_name: Option<String>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the fitsprep log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
