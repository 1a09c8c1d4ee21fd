//! Compatibility resolver reproducing the historical recursive behaviour.
//!
//! When an occupied interval splits the working bounds, both halves are
//! resolved recursively but the outer loop keeps comparing the *unsplit*
//! bounds against the remaining occupied intervals. Splits reached along
//! different paths repeat the same fragments, which are dropped by exact
//! bounds. If every half of a split is swallowed, nothing is recorded and the
//! trimmed unsplit bounds are emitted at the end, even though they may still
//! contain the splitting occupied interval.

use std::collections::BTreeSet;

use tracing::warn;

use super::case::OverlapCase;
use crate::interval::{BoundsKey, DepthInterval};

/// Residual fragments of `empty` after comparing it with `occupied` in input order.
pub(super) fn fragments(
    well: &str,
    empty: DepthInterval,
    occupied: &[DepthInterval],
) -> Vec<DepthInterval> {
    let mut from = empty.from();
    let mut to = empty.to();
    let mut found = Fragments::default();

    for occ in occupied {
        let working = DepthInterval::new(from, to);
        match OverlapCase::classify(&working, occ) {
            OverlapCase::Disjoint => {}
            // Whatever earlier splits produced is kept; the rest is swallowed.
            OverlapCase::Covers => return found.into_vec(),
            OverlapCase::Inside => {
                let upper = DepthInterval::new(from, occ.from());
                let lower = DepthInterval::new(occ.to(), to);
                found.extend(fragments(well, upper, occupied));
                found.extend(fragments(well, lower, occupied));
            }
            OverlapCase::OverlapsTop => from = occ.to(),
            OverlapCase::OverlapsBottom => to = occ.from(),
            OverlapCase::Unknown => {
                warn!(
                    well = %well,
                    empty = %working,
                    occupied = %occ,
                    "Unknown case for overlapping intervals"
                );
            }
        }
    }

    if found.is_empty() && from.value() < to.value() {
        found.push(DepthInterval::new(from, to));
    }
    found.into_vec()
}

/// Insertion-ordered set of fragments keyed by exact bounds.
#[derive(Default)]
struct Fragments {
    seen: BTreeSet<BoundsKey>,
    items: Vec<DepthInterval>,
}

impl Fragments {
    fn push(&mut self, interval: DepthInterval) {
        if self.seen.insert(BoundsKey::from(interval)) {
            self.items.push(interval);
        }
    }

    fn extend(&mut self, intervals: Vec<DepthInterval>) {
        for interval in intervals {
            self.push(interval);
        }
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_vec(self) -> Vec<DepthInterval> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(from: f64, to: f64) -> DepthInterval {
        DepthInterval::from_f64(from, to)
    }

    #[test]
    fn no_occupied_keeps_bounds() {
        assert_eq!(fragments("W", iv(0.0, 6.0), &[]), vec![iv(0.0, 6.0)]);
    }

    #[test]
    fn single_interior_split() {
        let occupied = [iv(2.0, 3.0)];
        assert_eq!(
            fragments("W", iv(0.0, 6.0), &occupied),
            vec![iv(0.0, 2.0), iv(3.0, 6.0)]
        );
    }

    #[test]
    fn trims_top_and_bottom() {
        let occupied = [iv(0.0, 1.0), iv(5.0, 8.0)];
        assert_eq!(fragments("W", iv(0.5, 6.0), &occupied), vec![iv(1.0, 5.0)]);
    }

    #[test]
    fn covered_interval_vanishes() {
        assert!(fragments("W", iv(17.0, 18.0), &[iv(17.0, 18.0)]).is_empty());
    }

    #[test]
    fn two_interior_intervals_produce_exact_duplicates_only() {
        let occupied = [iv(2.0, 3.0), iv(4.0, 5.0)];
        assert_eq!(
            fragments("W", iv(0.0, 6.0), &occupied),
            vec![iv(0.0, 2.0), iv(3.0, 4.0), iv(5.0, 6.0)]
        );
    }

    #[test]
    fn fully_covered_split_resurrects_occupied_depth() {
        // Both halves around [1, 2) are swallowed, so nothing is recorded;
        // later trims then leave [1.5, 2) which lies inside [1, 2).
        let occupied = [iv(1.0, 2.0), iv(0.0, 1.5), iv(2.0, 6.0)];
        let result = fragments("W", iv(0.0, 6.0), &occupied);
        assert_eq!(result, vec![iv(1.5, 2.0)]);
        assert!(result[0].overlaps(&occupied[0]));
    }
}
