//! Shared fixtures for ops integration tests

#![allow(dead_code)]

use fitsprep_config::Config;
use std::fs;
use std::path::Path;

const BLOCK: usize = 2880;

/// Header values written into a synthetic frame
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub exposure: Option<f64>,
    pub width: u64,
    pub height: u64,
}

impl Frame {
    pub fn new(exposure: f64, width: u64, height: u64) -> Self {
        Self {
            exposure: Some(exposure),
            width,
            height,
        }
    }
}

/// Write a minimal FITS file: one header block plus `payload`
pub fn write_fits(path: &Path, frame: Frame, payload: &[u8]) {
    let mut cards = vec![
        format!("{:<8}= {:>20}", "SIMPLE", "T"),
        format!("{:<8}= {:>20}", "BITPIX", 16),
        format!("{:<8}= {:>20}", "NAXIS", 2),
        format!("{:<8}= {:>20}", "NAXIS1", frame.width),
        format!("{:<8}= {:>20}", "NAXIS2", frame.height),
    ];
    if let Some(exposure) = frame.exposure {
        cards.push(format!("{:<8}= {:>20.3}", "EXPTIME", exposure));
    }
    cards.push("END".to_string());

    let mut bytes: Vec<u8> = cards
        .iter()
        .flat_map(|card| format!("{card:<80}").into_bytes())
        .collect();
    bytes.resize(bytes.len().div_ceil(BLOCK) * BLOCK, b' ');
    bytes.extend_from_slice(payload);

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// Write a file that is not FITS at all
pub fn write_garbage(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"definitely not a header").unwrap();
}

/// Defaults with the flat layout and validation off
pub fn flat_config() -> Config {
    let mut config = Config::default();
    config.layout.staged = false;
    config.validation.enabled = false;
    config
}

/// Sorted file names directly inside `dir`
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
