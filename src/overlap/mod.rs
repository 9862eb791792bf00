//! Opposite-strand overlap between two coding sequences
//!
//! Two CDS features are only compared when they sit on opposite strands
//! (exactly one of them is a complement feature). Same-strand overlap is
//! never reported. The result is the number of integer positions shared by
//! the half-open spans `[start, end)` of both features; a count above zero
//! means the genes overlap.
//!
//! Missing features (no CDS found upstream) give an overlap of zero rather
//! than an error.
//!
//! Both features are assumed to lie on the same sequence; that pairing is the
//! caller's responsibility.
//!
//! # Examples
//!
//! ```
//! use ferro_overlap::feature::GenomicFeature;
//! use ferro_overlap::overlap::{overlap_len, overlaps};
//!
//! let arfa = GenomicFeature::new(100, 200, false);
//! let mscl = GenomicFeature::new(150, 250, true);
//!
//! assert_eq!(overlap_len(Some(&arfa), Some(&mscl)), 50);
//! assert!(overlaps(Some(&arfa), Some(&mscl)));
//! assert_eq!(overlap_len(Some(&arfa), None), 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::feature::GenomicFeature;

/// Number of positions shared by two features on opposite strands.
///
/// Returns 0 when either feature is absent, when both are on the same
/// strand, or when the spans do not intersect.
pub fn overlap_len(left: Option<&GenomicFeature>, right: Option<&GenomicFeature>) -> u64 {
    match (left, right) {
        (Some(left), Some(right)) if left.is_complement() ^ right.is_complement() => {
            left.span().overlap_len(&right.span())
        }
        _ => 0,
    }
}

/// Whether two features overlap on opposite strands (`overlap_len > 0`).
pub fn overlaps(left: Option<&GenomicFeature>, right: Option<&GenomicFeature>) -> bool {
    overlap_len(left, right) > 0
}

/// One side of an [`OverlapReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSide {
    /// File path or accession the feature was read from
    pub id: String,
    /// The extracted CDS, absent when none was found
    pub feature: Option<GenomicFeature>,
}

/// The outcome of comparing two features, with their provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapReport {
    pub left: ReportSide,
    pub right: ReportSide,
    /// Shared positions; zero when not on opposite strands or data is missing
    pub overlap: u64,
}

impl OverlapReport {
    pub fn new(
        left_id: impl Into<String>,
        left: Option<GenomicFeature>,
        right_id: impl Into<String>,
        right: Option<GenomicFeature>,
    ) -> Self {
        let overlap = overlap_len(left.as_ref(), right.as_ref());
        Self {
            left: ReportSide {
                id: left_id.into(),
                feature: left,
            },
            right: ReportSide {
                id: right_id.into(),
                feature: right,
            },
            overlap,
        }
    }

    pub fn is_overlapping(&self) -> bool {
        self.overlap > 0
    }

    /// True when both sides have a feature to compare
    pub fn is_complete(&self) -> bool {
        self.left.feature.is_some() && self.right.feature.is_some()
    }
}
