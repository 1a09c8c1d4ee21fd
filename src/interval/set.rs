//! A canonical container for non-overlapping, sorted depth intervals.
//!
//! [`DepthSet`] wraps a `Vec<DepthInterval>` and guarantees the **canonical
//! invariant** at all times: intervals are sorted by `from`, none overlap and
//! touching intervals are merged. Zero-length intervals are dropped.
//!
//! Read access is transparent via `Deref<Target = [DepthInterval]>`.

use std::fmt::Display;
use std::ops::{Deref, Index};

use super::DepthInterval;
use crate::units::Depth;

/// A sorted, non-overlapping set of half-open depth intervals.
///
/// # Performance
///
/// - Construction from unsorted input: O(n log n) sort + O(n) merge.
/// - `push`: O(1) amortized when appending in order, O(n log n) otherwise.
/// - `complement_within`: linear in the member count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepthSet(Vec<DepthInterval>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl DepthSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────────────

impl DepthSet {
    /// Sorts by `from` and merges overlapping / touching intervals in place.
    fn normalize(&mut self) {
        self.0.retain(|iv| !iv.is_degenerate());
        if self.0.len() <= 1 {
            return;
        }
        self.0
            .sort_by(|a, b| a.from().value().total_cmp(&b.from().value()));
        let mut merged: Vec<DepthInterval> = Vec::with_capacity(self.0.len());
        for interval in self.0.drain(..) {
            match merged.last_mut() {
                Some(last) if last.to().value() >= interval.from().value() => {
                    if interval.to().value() > last.to().value() {
                        *last = DepthInterval::new(last.from(), interval.to());
                    }
                }
                _ => merged.push(interval),
            }
        }
        self.0 = merged;
    }

    fn is_canonical(intervals: &[DepthInterval]) -> bool {
        intervals.iter().all(|iv| !iv.is_degenerate())
            && intervals
                .windows(2)
                .all(|w| w[0].to().value() < w[1].from().value())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Mutation methods
// ─────────────────────────────────────────────────────────────────────

impl DepthSet {
    /// Inserts an interval, maintaining canonical form.
    pub fn push(&mut self, interval: DepthInterval) {
        if interval.is_degenerate() {
            return;
        }
        if let Some(last) = self.0.last_mut() {
            if interval.from().value() > last.to().value() {
                self.0.push(interval);
                return;
            }
            if interval.from().value() >= last.from().value() {
                if interval.to().value() > last.to().value() {
                    *last = DepthInterval::new(last.from(), interval.to());
                }
                return;
            }
            self.0.push(interval);
            self.normalize();
        } else {
            self.0.push(interval);
        }
    }

    pub fn into_inner(self) -> Vec<DepthInterval> {
        self.0
    }

    pub fn as_slice(&self) -> &[DepthInterval] {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Set operations
// ─────────────────────────────────────────────────────────────────────

impl DepthSet {
    /// Returns true when any member shares more than a boundary with `other`.
    pub fn overlaps(&self, other: &DepthInterval) -> bool {
        self.0.iter().any(|iv| iv.overlaps(other))
    }

    /// Returns the parts of `bounds` not covered by any member of `self`.
    ///
    /// Members reaching outside `bounds` are clipped; the result is canonical.
    pub fn complement_within(&self, bounds: DepthInterval) -> DepthSet {
        debug_assert!(Self::is_canonical(&self.0));
        let end = bounds.to();
        let mut result = DepthSet::new();
        let mut cursor: Depth = bounds.from();
        for iv in &self.0 {
            if cursor.value() >= end.value() {
                break;
            }
            if iv.to().value() <= cursor.value() {
                continue;
            }
            if iv.from().value() > cursor.value() {
                let gap_end = if iv.from().value() < end.value() {
                    iv.from()
                } else {
                    end
                };
                result.push(DepthInterval::new(cursor, gap_end));
            }
            if iv.to().value() > cursor.value() {
                cursor = iv.to();
            }
        }
        if cursor.value() < end.value() {
            result.push(DepthInterval::new(cursor, end));
        }
        result
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access
// ─────────────────────────────────────────────────────────────────────

impl Deref for DepthSet {
    type Target = [DepthInterval];

    fn deref(&self) -> &[DepthInterval] {
        &self.0
    }
}

impl AsRef<[DepthInterval]> for DepthSet {
    fn as_ref(&self) -> &[DepthInterval] {
        &self.0
    }
}

impl Index<usize> for DepthSet {
    type Output = DepthInterval;

    fn index(&self, index: usize) -> &DepthInterval {
        &self.0[index]
    }
}

// ─────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────

impl From<Vec<DepthInterval>> for DepthSet {
    /// Creates a `DepthSet` from an unsorted `Vec`, normalizing on construction.
    fn from(vec: Vec<DepthInterval>) -> Self {
        let mut set = Self(vec);
        set.normalize();
        set
    }
}

impl From<DepthInterval> for DepthSet {
    fn from(interval: DepthInterval) -> Self {
        Self::from(vec![interval])
    }
}

impl FromIterator<DepthInterval> for DepthSet {
    fn from_iter<I: IntoIterator<Item = DepthInterval>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<DepthInterval> for DepthSet {
    fn extend<I: IntoIterator<Item = DepthInterval>>(&mut self, iter: I) {
        self.0.extend(iter);
        self.normalize();
    }
}

impl IntoIterator for DepthSet {
    type Item = DepthInterval;
    type IntoIter = std::vec::IntoIter<DepthInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DepthSet {
    type Item = &'a DepthInterval;
    type IntoIter = std::slice::Iter<'a, DepthInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for DepthSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, interval) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, "}}")
    }
}

/// Enables `assert_eq!(depth_set, vec![...])` in tests.
impl PartialEq<Vec<DepthInterval>> for DepthSet {
    fn eq(&self, other: &Vec<DepthInterval>) -> bool {
        self.0 == *other
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
