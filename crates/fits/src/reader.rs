//! Primary header reader

use crate::header::MetadataCards;
use crate::{BLOCK_SIZE, CARD_SIZE};
use fitsprep_errors::FitsError;
use fitsprep_types::FrameMetadata;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Headers longer than this are treated as corrupt
pub const DEFAULT_MAX_HEADER_BLOCKS: usize = 64;

/// Source of header metadata for frame files
pub trait HeaderReader: Send + Sync {
    /// Exposure, gain and dimensions from the primary header of `path`
    ///
    /// # Errors
    ///
    /// Returns a `FitsError` when the file cannot be opened or does not start
    /// with a well-formed FITS primary header.
    fn read_metadata(&self, path: &Path) -> Result<FrameMetadata, FitsError>;
}

/// Reads headers from FITS files on disk
#[derive(Debug, Clone, Copy)]
pub struct FitsHeaderReader {
    max_blocks: usize,
}

impl Default for FitsHeaderReader {
    fn default() -> Self {
        Self {
            max_blocks: DEFAULT_MAX_HEADER_BLOCKS,
        }
    }
}

impl FitsHeaderReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_blocks(max_blocks: usize) -> Self {
        Self {
            max_blocks: max_blocks.max(1),
        }
    }

    /// Scan header cards from any byte stream
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a missing `SIMPLE` card or a stream that
    /// ends before `END`, and `HeaderTooLong` when no `END` card appears
    /// within the block limit.
    pub fn parse<R: Read>(&self, reader: &mut R, path: &Path) -> Result<MetadataCards, FitsError> {
        let mut cards = MetadataCards::new();
        let mut block = [0u8; BLOCK_SIZE];

        for index in 0..self.max_blocks {
            if let Err(e) = reader.read_exact(&mut block) {
                return Err(if e.kind() == io::ErrorKind::UnexpectedEof {
                    invalid(path, "file ends before the END card")
                } else {
                    unreadable(path, &e)
                });
            }

            for (position, card) in block.chunks_exact(CARD_SIZE).enumerate() {
                let keyword = String::from_utf8_lossy(&card[..8]);
                let keyword = keyword.trim_end();

                if index == 0 && position == 0 && keyword != "SIMPLE" {
                    return Err(invalid(path, "first card is not SIMPLE"));
                }
                if keyword == "END" {
                    tracing::trace!(
                        path = %path.display(),
                        keywords = cards.len(),
                        blocks = index + 1,
                        "read FITS header"
                    );
                    return Ok(cards);
                }
                if keyword.is_empty() || &card[8..10] != b"= " {
                    continue;
                }

                cards.record(keyword, &String::from_utf8_lossy(&card[10..]));
            }
        }

        Err(FitsError::HeaderTooLong {
            path: path.display().to_string(),
            blocks: self.max_blocks,
        })
    }
}

impl HeaderReader for FitsHeaderReader {
    fn read_metadata(&self, path: &Path) -> Result<FrameMetadata, FitsError> {
        let file = File::open(path).map_err(|e| unreadable(path, &e))?;
        self.parse(&mut BufReader::new(file), path)
            .map(|cards| MetadataCards::frame_metadata(&cards))
    }
}

fn unreadable(path: &Path, err: &io::Error) -> FitsError {
    FitsError::Unreadable {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn invalid(path: &Path, message: &str) -> FitsError {
    FitsError::InvalidFormat {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}
