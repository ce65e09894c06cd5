use spanlight_core::MatchRange;

/// Sort by start and fold overlapping or touching ranges together.
///
/// A merged range keeps the lowest contributing term index. Empty ranges are dropped.
pub fn merge_ranges(ranges: &[MatchRange]) -> Vec<MatchRange> {
    let mut sorted: Vec<MatchRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.term_index.cmp(&b.term_index))
    });

    let mut out: Vec<MatchRange> = Vec::with_capacity(sorted.len());
    for r in sorted {
        match out.last_mut() {
            Some(last) if r.start <= last.end => {
                last.end = last.end.max(r.end);
                last.term_index = last.term_index.min(r.term_index);
            }
            _ => out.push(r),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(start: usize, end: usize) -> MatchRange {
        MatchRange::new(start, end, 0)
    }

    #[test]
    fn merges_overlap_and_touching() {
        let out = merge_ranges(&[r(10, 12), r(0, 5), r(3, 8), r(8, 9)]);
        assert_eq!(out, vec![r(0, 9), r(10, 12)]);
    }

    #[test]
    fn keeps_disjoint_ranges_sorted() {
        let out = merge_ranges(&[r(6, 7), r(0, 2), r(3, 4)]);
        assert_eq!(out, vec![r(0, 2), r(3, 4), r(6, 7)]);
    }

    #[test]
    fn contained_range_is_absorbed() {
        let out = merge_ranges(&[r(0, 10), r(2, 3)]);
        assert_eq!(out, vec![r(0, 10)]);
    }

    #[test]
    fn merged_range_keeps_lowest_term_index() {
        let out = merge_ranges(&[MatchRange::new(4, 9, 2), MatchRange::new(0, 5, 5)]);
        assert_eq!(out, vec![MatchRange::new(0, 9, 2)]);
    }

    #[test]
    fn empty_input_and_empty_ranges() {
        assert!(merge_ranges(&[]).is_empty());
        assert!(merge_ranges(&[r(3, 3)]).is_empty());
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<MatchRange>> {
        prop::collection::vec((0usize..100, 1usize..20, 0usize..4), 0..30).prop_map(|v| {
            v.into_iter()
                .map(|(s, l, t)| MatchRange::new(s, s + l, t))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_disjoint(ranges in arb_ranges()) {
            let out = merge_ranges(&ranges);
            prop_assert!(out.len() <= ranges.len());
            for w in out.windows(2) {
                prop_assert!(w[0].end < w[1].start);
            }
        }

        #[test]
        fn merge_is_idempotent(ranges in arb_ranges()) {
            let once = merge_ranges(&ranges);
            prop_assert_eq!(merge_ranges(&once), once);
        }

        #[test]
        fn every_input_position_stays_covered(ranges in arb_ranges()) {
            let out = merge_ranges(&ranges);
            for r in &ranges {
                for p in r.start..r.end {
                    prop_assert!(out.iter().any(|m| m.start <= p && p < m.end));
                }
            }
        }
    }
}
