//! Property-based tests for the overlap evaluator

use ferro_overlap::coords::Interval;
use ferro_overlap::{overlap_len, GenomicFeature};
use proptest::prelude::*;

fn feature() -> impl Strategy<Value = GenomicFeature> {
    (1..100_000u64, 0..5_000u64, any::<bool>())
        .prop_map(|(start, len, comp)| GenomicFeature::new(start, start + len, comp))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in feature(), b in feature()) {
        prop_assert_eq!(overlap_len(Some(&a), Some(&b)), overlap_len(Some(&b), Some(&a)));
    }

    #[test]
    fn overlap_bounded_by_shorter_span(a in feature(), b in feature()) {
        let n = overlap_len(Some(&a), Some(&b));
        prop_assert!(n <= a.span().len().min(b.span().len()));
    }

    #[test]
    fn same_strand_never_overlaps(start in 1..100_000u64, len in 0..5_000u64, other in 1..100_000u64, comp in any::<bool>()) {
        let a = GenomicFeature::new(start, start + len, comp);
        let b = GenomicFeature::new(other, other + len, comp);
        prop_assert_eq!(overlap_len(Some(&a), Some(&b)), 0);
    }

    #[test]
    fn opposite_strand_matches_position_count(a in feature(), b in feature()) {
        let b = GenomicFeature::new(b.start(), b.end(), !a.is_complement());
        let expected = (a.start()..a.end()).filter(|p| b.span().contains(*p)).count() as u64;
        prop_assert_eq!(overlap_len(Some(&a), Some(&b)), expected);
    }

    #[test]
    fn inverted_ranges_never_overlap(start in 2..100_000u64, shrink in 1..1_000u64, b in feature()) {
        let end = start.saturating_sub(shrink);
        let a = GenomicFeature::new(start, end, !b.is_complement());
        prop_assert_eq!(overlap_len(Some(&a), Some(&b)), 0);
        prop_assert_eq!(Interval::new(start, end).len(), 0);
    }
}
