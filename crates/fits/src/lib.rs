#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! FITS header access for fitsprep
//!
//! Only the primary header is scanned, and only the exposure, gain and
//! dimension keywords are kept. Pixel data is never touched, so a frame
//! costs at most a few 2880-byte blocks of I/O.

pub mod header;
pub mod reader;

pub use header::{MetadataCards, EXPOSURE_KEYWORDS, GAIN_KEYWORDS};
pub use reader::{FitsHeaderReader, HeaderReader, DEFAULT_MAX_HEADER_BLOCKS};

/// Size of a FITS logical record
pub const BLOCK_SIZE: usize = 2880;

/// Size of a single header card
pub const CARD_SIZE: usize = 80;
