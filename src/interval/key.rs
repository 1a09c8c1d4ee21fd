use super::DepthInterval;

/// A total-order key for `f64` using IEEE-754 total order (`total_cmp`).
/// This lets us use `f64` depths as `BTreeSet`/`BTreeMap` keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F64Key(pub(crate) f64);

impl F64Key {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for F64Key {}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Exact `(from, to)` identity of an interval, used to drop fragments that
/// different code paths produced twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoundsKey(F64Key, F64Key);

impl From<&DepthInterval> for BoundsKey {
    fn from(interval: &DepthInterval) -> Self {
        Self(F64Key(interval.from().value()), F64Key(interval.to().value()))
    }
}

impl From<DepthInterval> for BoundsKey {
    fn from(interval: DepthInterval) -> Self {
        Self::from(&interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn identical_bounds_collapse() {
        let mut seen = BTreeSet::new();
        assert!(seen.insert(BoundsKey::from(DepthInterval::from_f64(0.0, 2.0))));
        assert!(!seen.insert(BoundsKey::from(DepthInterval::from_f64(0.0, 2.0))));
        assert!(seen.insert(BoundsKey::from(DepthInterval::from_f64(0.0, 2.5))));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn keys_order_by_from_then_to() {
        let a = BoundsKey::from(DepthInterval::from_f64(1.0, 9.0));
        let b = BoundsKey::from(DepthInterval::from_f64(2.0, 3.0));
        let c = BoundsKey::from(DepthInterval::from_f64(2.0, 4.0));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn f64_key_total_order() {
        assert!(F64Key(-0.0) < F64Key(0.0));
        assert_eq!(F64Key(1.5).value(), 1.5);
    }
}
