use crate::interval::DepthInterval;

/// How an occupied interval sits relative to the working bounds of an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCase {
    /// No shared depth; the empty interval is unaffected.
    Disjoint,
    /// The occupied interval swallows the empty one.
    Covers,
    /// The occupied interval lies strictly inside and splits the empty one.
    Inside,
    /// The occupied interval reaches over the top (`from`) of the empty one.
    OverlapsTop,
    /// The occupied interval reaches over the bottom (`to`) of the empty one.
    OverlapsBottom,
    /// None of the above; only reachable with NaN bounds.
    Unknown,
}

impl OverlapCase {
    pub fn classify(empty: &DepthInterval, occupied: &DepthInterval) -> Self {
        Self::classify_bounds(
            empty.from().value(),
            empty.to().value(),
            occupied.from().value(),
            occupied.to().value(),
        )
    }

    fn classify_bounds(from: f64, to: f64, o_from: f64, o_to: f64) -> Self {
        if o_to <= from || o_from >= to {
            Self::Disjoint
        } else if o_from <= from && o_to >= to {
            Self::Covers
        } else if o_from > from && o_to < to {
            Self::Inside
        } else if o_from <= from && o_to > from && o_to < to {
            Self::OverlapsTop
        } else if o_from > from && o_from < to && o_to >= to {
            Self::OverlapsBottom
        } else {
            Self::Unknown
        }
    }
}
