//! Integration tests for fits crate

use fitsprep_errors::FitsError;
use fitsprep_fits::{FitsHeaderReader, HeaderReader, BLOCK_SIZE};
use std::fs;
use tempfile::TempDir;

fn write_frame(path: &std::path::Path, cards: &[String]) {
    let mut bytes = Vec::new();
    for card in cards.iter().map(String::as_str).chain(["END"]) {
        bytes.extend(format!("{card:<80}").into_bytes());
    }
    bytes.resize(bytes.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, b' ');
    // one block of pixel data
    bytes.extend(std::iter::repeat_n(0u8, BLOCK_SIZE));
    fs::write(path, bytes).unwrap();
}

#[test]
fn reads_metadata_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("light.fits");
    write_frame(
        &path,
        &[
            format!("{:<8}= {:>20}", "SIMPLE", "T"),
            format!("{:<8}= {:>20}", "NAXIS1", 1920),
            format!("{:<8}= {:>20}", "NAXIS2", 1080),
            format!("{:<8}= {:>20}", "EXPOSURE", "120.5"),
            format!("{:<8}= {:>20}", "ISOSPEED", 1600),
        ],
    );

    let meta = FitsHeaderReader::new().read_metadata(&path).unwrap();
    assert_eq!(meta.exposure, Some(120.5));
    assert_eq!(meta.gain, Some(1600.0));
    assert_eq!(meta.width, Some(1920));
    assert_eq!(meta.height, Some(1080));
}

#[test]
fn missing_keywords_stay_absent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bare.fits");
    write_frame(&path, &[format!("{:<8}= {:>20}", "SIMPLE", "T")]);

    let meta = FitsHeaderReader::new().read_metadata(&path).unwrap();
    assert_eq!(meta.exposure, None);
    assert_eq!(meta.width, None);
}

#[test]
fn missing_file_is_unreadable() {
    let temp = TempDir::new().unwrap();
    let err = FitsHeaderReader::new()
        .read_metadata(&temp.path().join("gone.fits"))
        .unwrap_err();
    assert!(matches!(err, FitsError::Unreadable { .. }));
}

#[test]
fn text_file_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.fits");
    fs::write(&path, "not a fits file").unwrap();

    let err = FitsHeaderReader::new().read_metadata(&path).unwrap_err();
    assert!(matches!(err, FitsError::InvalidFormat { .. }));
}
