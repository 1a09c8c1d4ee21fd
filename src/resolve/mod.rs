//! Interval overlap resolver.
//!
//! Sample intervals of one well are split into *occupied* (finds > 0) and
//! *empty* ones. Every empty interval is replaced by the parts of it that no
//! occupied interval touches, so that downstream point clouds never carry an
//! empty sample on top of a productive one.
//!
//! Two strategies are available:
//!
//! - [`ResolveStrategy::Sweep`] (default) subtracts the canonical union of
//!   all occupied intervals in a single linear pass.
//! - [`ResolveStrategy::Legacy`] reproduces the historical recursive
//!   comparison in input order, including its known flaw (see `legacy`).
//!
//! Both drop fragments whose exact `(from, to)` already appeared for the
//! same well, force finds on residual empties to `0` and append occupied
//! intervals unchanged after the empties.
//!
//! # Example
//!
//! ```
//! use boregeo::interval::DepthInterval;
//! use boregeo::resolve::resolve_overlaps;
//! use boregeo::sample::SampleInterval;
//!
//! let sample = |from, to, finds| {
//!     SampleInterval::new("W", DepthInterval::from_f64(from, to)).with_finds(finds)
//! };
//! let resolved = resolve_overlaps(&[
//!     sample(2.0, 3.0, 1.0),
//!     sample(4.0, 5.0, 2.0),
//!     sample(0.0, 6.0, 0.0),
//! ]);
//! let empties: Vec<_> = resolved
//!     .iter()
//!     .filter(|s| !s.is_occupied())
//!     .map(|s| (s.from().value(), s.to().value()))
//!     .collect();
//! assert_eq!(empties, vec![(0.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
//! ```

mod case;
mod legacy;
mod sweep;


use std::collections::BTreeSet;

use tracing::debug;

use crate::interval::{BoundsKey, DepthInterval, DepthSet};
use crate::sample::{group_by_well, SampleInterval};

pub use case::OverlapCase;

/// Which overlap-removal algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResolveStrategy {
    /// Single linear subtraction of the occupied union.
    #[default]
    Sweep,
    /// Historical recursive comparison, kept for output compatibility.
    Legacy,
}

/// Resolver output for one well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Residual empty fragments, in the order of their source intervals.
    pub empty: Vec<SampleInterval>,
    /// Occupied intervals, unchanged and in input order.
    pub occupied: Vec<SampleInterval>,
}

impl Resolution {
    /// Resolves one well's intervals with the given strategy.
    pub fn compute(well_intervals: &[SampleInterval], strategy: ResolveStrategy) -> Self {
        let (occupied, empty): (Vec<&SampleInterval>, Vec<&SampleInterval>) =
            well_intervals.iter().partition(|s| s.is_occupied());

        let occupied: Vec<SampleInterval> = occupied.into_iter().cloned().collect();
        if occupied.is_empty() {
            return Self {
                empty: empty.into_iter().cloned().collect(),
                occupied,
            };
        }

        let occupied_bounds: Vec<DepthInterval> = occupied.iter().map(|s| s.interval()).collect();
        let occupied_set = match strategy {
            ResolveStrategy::Sweep => DepthSet::from(occupied_bounds.clone()),
            ResolveStrategy::Legacy => DepthSet::new(),
        };

        let mut seen: BTreeSet<BoundsKey> = BTreeSet::new();
        let mut residual = Vec::with_capacity(empty.len());
        for sample in empty {
            let pieces = match strategy {
                ResolveStrategy::Sweep => sweep::fragments(sample.interval(), &occupied_set),
                ResolveStrategy::Legacy => {
                    legacy::fragments(sample.well(), sample.interval(), &occupied_bounds)
                }
            };
            for piece in pieces {
                if seen.insert(BoundsKey::from(piece)) {
                    residual.push(sample.clone().with_interval(piece).with_finds(0.0));
                }
            }
        }

        Self {
            empty: residual,
            occupied,
        }
    }

    /// Residual empties followed by the occupied intervals.
    pub fn into_records(self) -> Vec<SampleInterval> {
        let mut records = self.empty;
        records.extend(self.occupied);
        records
    }
}

/// Removes occupied depth from empty intervals using the linear sweep.
///
/// Input may mix wells; each well is resolved on its own and wells appear in
/// the output in order of first appearance.
pub fn resolve_overlaps(well_intervals: &[SampleInterval]) -> Vec<SampleInterval> {
    resolve_with(well_intervals, ResolveStrategy::Sweep)
}

/// Same contract as [`resolve_overlaps`] with the historical recursive algorithm.
pub fn resolve_overlaps_legacy(well_intervals: &[SampleInterval]) -> Vec<SampleInterval> {
    resolve_with(well_intervals, ResolveStrategy::Legacy)
}

/// Resolves overlaps well by well with the chosen strategy.
///
/// [`resolve_overlaps`] and [`resolve_overlaps_legacy`] are shorthands for
/// the two strategies; the pipeline dispatches here from its config.
pub fn resolve_with(
    well_intervals: &[SampleInterval],
    strategy: ResolveStrategy,
) -> Vec<SampleInterval> {
    let mut output = Vec::with_capacity(well_intervals.len());
    for (well, group) in group_by_well(well_intervals) {
        let resolution = Resolution::compute(&group, strategy);
        debug!(
            well = %well,
            ?strategy,
            empty = resolution.empty.len(),
            occupied = resolution.occupied.len(),
            "Resolved interval overlaps"
        );
        output.extend(resolution.into_records());
    }
    output
}
