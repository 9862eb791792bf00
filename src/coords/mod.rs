//! Half-open genomic intervals
//!
//! Overlap between two coding sequences is computed on half-open
//! `[start, end)` intervals over the raw coordinates reported by the
//! source database. The end position is excluded, so intervals that only
//! touch (`[10, 20)` and `[20, 30)`) share nothing.
//!
//! # Examples
//!
//! ```
//! use ferro_overlap::coords::Interval;
//!
//! let a = Interval::new(100, 200);
//! let b = Interval::new(150, 250);
//! assert_eq!(a.overlap_len(&b), 50);
//! assert_eq!(a.intersection(&b), Some(Interval::new(150, 200)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open interval `[start, end)`
///
/// Inverted intervals (`end < start`) are representable; they behave as
/// empty and never overlap anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Create a new half-open interval
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of positions covered, zero for empty or inverted intervals
    #[inline]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if interval is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether a position lies inside the interval
    #[inline]
    pub const fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Intersection of two intervals, `None` when they share no position
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        let shared = Interval::new(start, end);
        if shared.is_empty() {
            None
        } else {
            Some(shared)
        }
    }

    /// Count of positions shared by both intervals
    #[inline]
    pub fn overlap_len(&self, other: &Interval) -> u64 {
        self.intersection(other).map_or(0, |i| i.len())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
