use crate::interval::{DepthInterval, DepthSet};

/// Residual fragments of `empty` once the whole occupied set is subtracted.
///
/// `occupied` is canonical (sorted, merged), so a single pass over it
/// yields the gaps in depth order.
pub(super) fn fragments(empty: DepthInterval, occupied: &DepthSet) -> Vec<DepthInterval> {
    occupied.complement_within(empty).into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(from: f64, to: f64) -> DepthInterval {
        DepthInterval::from_f64(from, to)
    }

    #[test]
    fn subtracts_every_interior_interval() {
        let occupied = DepthSet::from(vec![iv(4.0, 5.0), iv(2.0, 3.0)]);
        assert_eq!(
            fragments(iv(0.0, 6.0), &occupied),
            vec![iv(0.0, 2.0), iv(3.0, 4.0), iv(5.0, 6.0)]
        );
    }

    #[test]
    fn order_of_occupied_input_does_not_matter() {
        let occupied = DepthSet::from(vec![iv(1.0, 2.0), iv(0.0, 1.5), iv(2.0, 6.0)]);
        assert!(fragments(iv(0.0, 6.0), &occupied).is_empty());
    }

    #[test]
    fn partial_overlaps_trim() {
        let occupied = DepthSet::from(vec![iv(17.5, 18.5), iv(19.5, 20.5)]);
        assert_eq!(fragments(iv(18.0, 19.0), &occupied), vec![iv(18.5, 19.0)]);
        assert_eq!(fragments(iv(19.0, 20.0), &occupied), vec![iv(19.0, 19.5)]);
    }
}
