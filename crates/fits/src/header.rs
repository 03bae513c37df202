//! Keyword values used for frame matching

use fitsprep_types::FrameMetadata;

/// Exposure keywords, in fallback order
pub const EXPOSURE_KEYWORDS: [&str; 2] = ["EXPTIME", "EXPOSURE"];

/// Gain keywords, in fallback order (`ISOSPEED` for DSLR frames)
pub const GAIN_KEYWORDS: [&str; 2] = ["GAIN", "ISOSPEED"];

const WIDTH_KEYWORD: &str = "NAXIS1";
const HEIGHT_KEYWORD: &str = "NAXIS2";

/// Raw values of the matching keywords found in a header
///
/// Every other card is ignored. The first occurrence of a keyword wins.
#[derive(Debug, Clone, Default)]
pub struct MetadataCards {
    values: Vec<(&'static str, String)>,
}

impl MetadataCards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the value field of a card if its keyword is one we match on
    pub fn record(&mut self, keyword: &str, raw_value: &str) {
        let Some(known) = EXPOSURE_KEYWORDS
            .iter()
            .chain(&GAIN_KEYWORDS)
            .chain(&[WIDTH_KEYWORD, HEIGHT_KEYWORD])
            .copied()
            .find(|k| *k == keyword)
        else {
            return;
        };
        if self.value(known).is_some() {
            return;
        }
        if let Some(value) = value_text(raw_value) {
            self.values.push((known, value));
        }
    }

    #[must_use]
    pub fn value(&self, keyword: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn real(&self, keywords: &[&str]) -> Option<f64> {
        keywords
            .iter()
            .find_map(|k| self.value(k).and_then(parse_real))
    }

    fn axis(&self, keyword: &str) -> Option<u64> {
        self.value(keyword)?.parse().ok()
    }

    /// Exposure, gain and dimensions; anything absent or non-numeric is `None`
    #[must_use]
    pub fn frame_metadata(&self) -> FrameMetadata {
        FrameMetadata {
            exposure: self.real(&EXPOSURE_KEYWORDS),
            gain: self.real(&GAIN_KEYWORDS),
            width: self.axis(WIDTH_KEYWORD),
            height: self.axis(HEIGHT_KEYWORD),
        }
    }
}

/// Value field without its comment; quoted numbers such as `'400'` are unwrapped
fn value_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let value = match raw.strip_prefix('\'') {
        Some(quoted) => quoted.split_once('\'')?.0,
        None => raw.split_once('/').map_or(raw, |(value, _)| value),
    }
    .trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Fortran-style `D` exponents are accepted
fn parse_real(value: &str) -> Option<f64> {
    value.replace(['D', 'd'], "E").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrelated_keywords_are_ignored() {
        let mut cards = MetadataCards::new();
        cards.record("BITPIX", "16");
        cards.record("INSTRUME", "'ZWO ASI294MC Pro'");
        cards.record("NAXIS1", "  4144 / length of axis 1");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards.value("NAXIS1"), Some("4144"));
    }

    #[test]
    fn value_forms() {
        let mut cards = MetadataCards::new();
        cards.record("EXPTIME", "3.0D+01 / exposure");
        cards.record("ISOSPEED", "'800     '");
        cards.record("NAXIS2", "   / only a comment");
        let meta = cards.frame_metadata();
        assert_eq!(meta.exposure, Some(30.0));
        assert_eq!(meta.gain, Some(800.0));
        assert_eq!(meta.height, None);
    }

    #[test]
    fn metadata_prefers_primary_keywords() {
        let mut cards = MetadataCards::new();
        cards.record("EXPOSURE", "1.0");
        cards.record("EXPTIME", "5.0");
        cards.record("EXPTIME", "7.0");
        cards.record("ISOSPEED", "800");

        let meta = cards.frame_metadata();
        assert_eq!(meta.exposure, Some(5.0));
        assert_eq!(meta.gain, Some(800.0));
    }

    #[test]
    fn negative_or_fractional_axis_is_absent() {
        let mut cards = MetadataCards::new();
        cards.record("NAXIS1", "-1");
        cards.record("NAXIS2", "2822.5");
        let meta = cards.frame_metadata();
        assert_eq!((meta.width, meta.height), (None, None));
    }
}
