//! CDS feature records extracted from sequence database XML
//!
//! A [`GenomicFeature`] holds the coordinates and strand of the first coding
//! sequence (`<feature name="CDS" .../>`) found in an ENA record.
//!
//! # Examples
//!
//! ```
//! use ferro_overlap::feature::{parse_str, Strand};
//!
//! let xml = r#"<ROOT><entry accession="AAC21905">
//!   <feature name="CDS" location="complement(L42023.1:265624..265833)"/>
//! </entry></ROOT>"#;
//!
//! let feature = parse_str(xml).unwrap().expect("CDS present");
//! assert_eq!(feature.start(), 265624);
//! assert_eq!(feature.end(), 265833);
//! assert!(feature.is_complement());
//! assert_eq!(feature.strand(), Strand::Reverse);
//! ```

mod extract;
mod location;

pub use extract::{parse_bytes, parse_file, parse_reader, parse_str};
pub use location::{FeatureAttributes, LocationGrammar};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::Interval;

/// Strand a coding sequence is transcribed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    /// Reference orientation
    Forward,
    /// Reverse complement
    Reverse,
}

impl Strand {
    pub const fn from_complement(is_complement: bool) -> Self {
        if is_complement {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Coordinates and strand of a coding sequence
///
/// `start` and `end` are kept exactly as the source reported them, so a
/// reverse-strand CDS still has `start <= end`. Fields are private; a
/// feature never changes after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicFeature {
    start: u64,
    end: u64,
    is_complement: bool,
}

impl GenomicFeature {
    pub const fn new(start: u64, end: u64, is_complement: bool) -> Self {
        Self {
            start,
            end,
            is_complement,
        }
    }

    #[inline]
    pub const fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// True when the CDS lies on the reverse complement strand
    #[inline]
    pub const fn is_complement(&self) -> bool {
        self.is_complement
    }

    pub const fn strand(&self) -> Strand {
        Strand::from_complement(self.is_complement)
    }

    /// Half-open span `[start, end)` used for overlap computation
    pub const fn span(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// `(start, end, is_complement)`
    pub const fn as_tuple(&self) -> (u64, u64, bool) {
        (self.start, self.end, self.is_complement)
    }
}

impl From<(u64, u64, bool)> for GenomicFeature {
    fn from((start, end, is_complement): (u64, u64, bool)) -> Self {
        Self::new(start, end, is_complement)
    }
}

impl fmt::Display for GenomicFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comp = if self.is_complement { "True" } else { "False" };
        write!(f, "({}, {}, {})", self.start, self.end, comp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let feature = GenomicFeature::new(265624, 265833, true);
        assert_eq!(feature.start(), 265624);
        assert_eq!(feature.end(), 265833);
        assert!(feature.is_complement());
        assert_eq!(feature.as_tuple(), (265624, 265833, true));
    }

    #[test]
    fn test_strand() {
        assert_eq!(GenomicFeature::new(1, 2, false).strand(), Strand::Forward);
        assert_eq!(GenomicFeature::new(1, 2, true).strand(), Strand::Reverse);
        assert_eq!(Strand::from_complement(true), Strand::Reverse);
        assert_eq!(Strand::from_complement(false), Strand::Forward);
        for is_complement in [false, true] {
            let feature = GenomicFeature::new(1, 2, is_complement);
            assert_eq!(feature.strand(), Strand::from_complement(is_complement));
        }
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn test_span_is_half_open() {
        let span = GenomicFeature::new(100, 200, false).span();
        assert_eq!(span, Interval::new(100, 200));
        assert_eq!(span.len(), 100);
    }

    #[test]
    fn test_display_matches_tuple_output() {
        assert_eq!(
            GenomicFeature::new(265624, 265833, true).to_string(),
            "(265624, 265833, True)"
        );
        assert_eq!(
            GenomicFeature::new(1, 9, false).to_string(),
            "(1, 9, False)"
        );
    }

    #[test]
    fn test_from_tuple() {
        let feature: GenomicFeature = (10, 20, false).into();
        assert_eq!(feature, GenomicFeature::new(10, 20, false));
    }

    #[test]
    fn test_serde_json() {
        let feature = GenomicFeature::new(10, 20, true);
        let json = serde_json::to_string(&feature).unwrap();
        assert_eq!(json, r#"{"start":10,"end":20,"is_complement":true}"#);
    }
}
