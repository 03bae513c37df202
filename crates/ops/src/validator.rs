//! Header-based compatibility checks

use fitsprep_errors::FitsError;
use fitsprep_fits::HeaderReader;
use fitsprep_types::{
    Baseline, CandidateFrame, Compatibility, FrameCategory, FrameMetadata, MetadataField,
};
use std::path::Path;

/// Reads frame metadata and compares calibration frames with the baseline
pub struct MetadataValidator<'a> {
    reader: &'a dyn HeaderReader,
}

impl<'a> MetadataValidator<'a> {
    #[must_use]
    pub fn new(reader: &'a dyn HeaderReader) -> Self {
        Self { reader }
    }

    /// Read metadata, keeping the failure for reporting
    ///
    /// # Errors
    ///
    /// Returns the reader's error when the header cannot be read.
    pub fn read(&self, path: &Path) -> Result<FrameMetadata, FitsError> {
        self.reader.read_metadata(path)
    }

    /// Read metadata; `None` on any failure
    #[must_use]
    pub fn read_metadata(&self, path: &Path) -> Option<FrameMetadata> {
        match self.read(path) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable frame header");
                None
            }
        }
    }

    /// First frame whose header reads successfully; stops scanning there
    #[must_use]
    pub fn establish_baseline(
        &self,
        frames: impl IntoIterator<Item = CandidateFrame>,
    ) -> Option<Baseline> {
        frames.into_iter().find_map(|frame| {
            self.read_metadata(&frame.path).map(|metadata| Baseline {
                source: frame.path,
                metadata,
            })
        })
    }

    /// Compare a calibration frame against the baseline.
    ///
    /// Width and height must be equal for every category; darks must also
    /// match exposure exactly. A required field missing on either side fails.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn check(
        candidate: &FrameMetadata,
        baseline: &FrameMetadata,
        category: FrameCategory,
    ) -> Compatibility {
        let (expected, found) = match (
            baseline.width.zip(baseline.height),
            candidate.width.zip(candidate.height),
        ) {
            (Some(expected), Some(found)) => (expected, found),
            (None, _) => {
                return Compatibility::MissingField {
                    field: missing_dimension(baseline),
                }
            }
            (_, None) => {
                return Compatibility::MissingField {
                    field: missing_dimension(candidate),
                }
            }
        };
        if expected != found {
            return Compatibility::DimensionMismatch { expected, found };
        }

        if category == FrameCategory::Dark {
            let (Some(expected), Some(found)) = (baseline.exposure, candidate.exposure) else {
                return Compatibility::MissingField {
                    field: MetadataField::Exposure,
                };
            };
            if expected != found {
                return Compatibility::ExposureMismatch { expected, found };
            }
        }

        Compatibility::Compatible
    }

    #[must_use]
    pub fn is_compatible(
        candidate: &FrameMetadata,
        baseline: &FrameMetadata,
        category: FrameCategory,
    ) -> bool {
        Self::check(candidate, baseline, category).is_compatible()
    }
}

fn missing_dimension(metadata: &FrameMetadata) -> MetadataField {
    if metadata.width.is_none() {
        MetadataField::Width
    } else {
        MetadataField::Height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves metadata by file name; anything else is unreadable
    struct NamedHeaders {
        frames: Vec<(&'static str, FrameMetadata)>,
        reads: AtomicUsize,
    }

    impl HeaderReader for NamedHeaders {
        fn read_metadata(&self, path: &Path) -> Result<FrameMetadata, FitsError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.frames
                .iter()
                .find(|(name, _)| path.ends_with(name))
                .map(|(_, metadata)| *metadata)
                .ok_or_else(|| FitsError::InvalidFormat {
                    path: path.display().to_string(),
                    message: "first card is not SIMPLE".into(),
                })
        }
    }

    fn meta(exposure: Option<f64>, width: Option<u64>, height: Option<u64>) -> FrameMetadata {
        FrameMetadata {
            exposure,
            gain: None,
            width,
            height,
        }
    }

    #[test]
    fn dark_requires_equal_exposure() {
        let baseline = meta(Some(5.0), Some(4144), Some(2822));
        let dark = meta(Some(10.0), Some(4144), Some(2822));
        assert_eq!(
            MetadataValidator::check(&dark, &baseline, FrameCategory::Dark),
            Compatibility::ExposureMismatch {
                expected: 5.0,
                found: 10.0
            }
        );
        assert!(MetadataValidator::is_compatible(
            &meta(Some(5.0), Some(4144), Some(2822)),
            &baseline,
            FrameCategory::Dark
        ));
    }

    #[test]
    fn flats_and_bias_ignore_exposure() {
        let baseline = meta(Some(300.0), Some(100), Some(50));
        let flat = meta(Some(0.5), Some(100), Some(50));
        let bias = meta(None, Some(100), Some(50));
        assert!(MetadataValidator::is_compatible(&flat, &baseline, FrameCategory::Flat));
        assert!(MetadataValidator::is_compatible(&bias, &baseline, FrameCategory::Bias));
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let baseline = meta(None, Some(4144), Some(2822));
        let binned = meta(None, Some(2072), Some(1411));
        assert_eq!(
            MetadataValidator::check(&binned, &baseline, FrameCategory::Flat),
            Compatibility::DimensionMismatch {
                expected: (4144, 2822),
                found: (2072, 1411)
            }
        );
    }

    #[test]
    fn missing_fields_fail_closed() {
        let full = meta(Some(5.0), Some(10), Some(10));
        assert_eq!(
            MetadataValidator::check(&meta(Some(5.0), Some(10), None), &full, FrameCategory::Bias),
            Compatibility::MissingField {
                field: MetadataField::Height
            }
        );
        assert_eq!(
            MetadataValidator::check(&full, &meta(Some(5.0), None, Some(10)), FrameCategory::Bias),
            Compatibility::MissingField {
                field: MetadataField::Width
            }
        );
        assert_eq!(
            MetadataValidator::check(&meta(None, Some(10), Some(10)), &full, FrameCategory::Dark),
            Compatibility::MissingField {
                field: MetadataField::Exposure
            }
        );
    }

    #[test]
    fn baseline_is_first_readable_light_and_scan_stops() {
        let reader = NamedHeaders {
            frames: vec![
                ("b.fits", meta(Some(30.0), Some(4144), Some(2822))),
                ("c.fits", meta(Some(60.0), Some(10), Some(10))),
            ],
            reads: AtomicUsize::new(0),
        };
        let validator = MetadataValidator::new(&reader);
        let frames = ["a.fits", "b.fits", "c.fits"]
            .into_iter()
            .filter_map(|name| CandidateFrame::new(format!("/lights/{name}"), FrameCategory::Light));

        let baseline = validator.establish_baseline(frames).unwrap();
        assert_eq!(baseline.source, Path::new("/lights/b.fits"));
        assert_eq!(baseline.metadata.exposure, Some(30.0));
        assert_eq!(reader.reads.load(Ordering::SeqCst), 2);
        assert!(validator.read_metadata(Path::new("/lights/a.fits")).is_none());
    }
}
