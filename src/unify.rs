//! Stratigraphic layer unifier.
//!
//! Consecutive intervals of a well that carry the same stratigraphic code
//! are collapsed into one layer. Sub-codes ("packets") such as `J1sn$` or
//! `J1sn@` can first be folded into their parent code so that a whole
//! packet merges into a single layer.
//!
//! The same codes drive two follow-up selections: picking the layers of
//! one target code (their roof and sole become the output surface points)
//! and clearing finds on samples outside a target age.

use std::collections::HashMap;

use tracing::debug;

use crate::interval::DepthInterval;
use crate::sample::{group_by_well, SampleInterval};

/// Replaces every code containing `target` with `target` itself.
///
/// An empty target leaves the records untouched.
pub fn normalize_packets(intervals: &[SampleInterval], target: &str) -> Vec<SampleInterval> {
    if target.is_empty() {
        return intervals.to_vec();
    }
    intervals
        .iter()
        .map(|s| match s.code() {
            Some(code) if code != target && code.contains(target) => {
                s.clone().with_code(target)
            }
            _ => s.clone(),
        })
        .collect()
}

/// Merges runs of equally coded consecutive intervals, well by well.
///
/// Each well's intervals are ordered by `from` (stable) before the pass. A
/// merged layer spans the first member's `from` to the deepest `to` of the
/// run (the last member's for contiguous layers) and keeps the first
/// member's finds and attributes. Records without a code form runs with
/// each other.
///
/// ```
/// use boregeo::interval::DepthInterval;
/// use boregeo::sample::SampleInterval;
/// use boregeo::unify::unify_layers;
///
/// let layer = |from, to, code| {
///     SampleInterval::new("W", DepthInterval::from_f64(from, to)).with_code(code)
/// };
/// let merged = unify_layers(
///     &[layer(0.0, 5.0, "A"), layer(5.0, 9.0, "A"), layer(9.0, 12.0, "B")],
///     None,
/// );
/// let shape: Vec<_> = merged
///     .iter()
///     .map(|s| (s.from().value(), s.to().value(), s.code().unwrap_or_default()))
///     .collect();
/// assert_eq!(shape, vec![(0.0, 9.0, "A"), (9.0, 12.0, "B")]);
/// ```
pub fn unify_layers(
    well_intervals: &[SampleInterval],
    packet_target: Option<&str>,
) -> Vec<SampleInterval> {
    let normalized = match packet_target {
        Some(target) => normalize_packets(well_intervals, target),
        None => well_intervals.to_vec(),
    };

    let mut output = Vec::with_capacity(normalized.len());
    for (well, mut group) in group_by_well(&normalized) {
        group.sort_by(|a, b| a.from().value().total_cmp(&b.from().value()));
        let before = group.len();
        let layers = merge_runs(group);
        debug!(well = %well, before, after = layers.len(), "Unified layers");
        output.extend(layers);
    }
    output
}

/// Keeps the layers of the target code.
///
/// With `exact` the code must equal `target` (packets already folded into
/// it); otherwise any code containing `target` matches, so `J1sn` also
/// selects `J1sn$` and `J1sn@`.
pub fn select_layers(layers: &[SampleInterval], target: &str, exact: bool) -> Vec<SampleInterval> {
    layers
        .iter()
        .filter(|s| match s.code() {
            Some(code) if exact => code == target,
            Some(code) => code.contains(target),
            None => false,
        })
        .cloned()
        .collect()
}

/// Tags every layer with the number of layers its well has in `layers`.
///
/// A count above one flags interbedding: the same code met several times
/// down one hole.
pub fn count_layers(layers: Vec<SampleInterval>, column: &str) -> Vec<SampleInterval> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for layer in &layers {
        *counts.entry(layer.well().to_string()).or_default() += 1;
    }
    layers
        .into_iter()
        .map(|layer| {
            let count = counts.get(layer.well()).copied().unwrap_or_default();
            layer.with_attribute(column, count.to_string())
        })
        .collect()
}

/// Clears finds on occupied samples whose code does not contain `target`.
///
/// Samples without a code count as outside the target. An empty target
/// leaves the records untouched.
pub fn highlight_by_age(intervals: &[SampleInterval], target: &str) -> Vec<SampleInterval> {
    if target.is_empty() {
        return intervals.to_vec();
    }
    intervals
        .iter()
        .map(|s| {
            let in_age = s.code().is_some_and(|code| code.contains(target));
            if s.is_occupied() && !in_age {
                s.clone().with_finds(0.0)
            } else {
                s.clone()
            }
        })
        .collect()
}

fn merge_runs(sorted: Vec<SampleInterval>) -> Vec<SampleInterval> {
    let mut layers: Vec<SampleInterval> = Vec::new();
    let mut run: Option<(SampleInterval, DepthInterval)> = None;

    for record in sorted {
        run = match run.take() {
            Some((head, span)) if head.code() == record.code() => {
                let to = if record.to().value() > span.to().value() {
                    record.to()
                } else {
                    span.to()
                };
                Some((head, DepthInterval::new(span.from(), to)))
            }
            Some((head, span)) => {
                layers.push(head.with_interval(span));
                let span = record.interval();
                Some((record, span))
            }
            None => {
                let span = record.interval();
                Some((record, span))
            }
        };
    }
    if let Some((head, span)) = run {
        layers.push(head.with_interval(span));
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(well: &str, from: f64, to: f64, code: &str) -> SampleInterval {
        SampleInterval::new(well, DepthInterval::from_f64(from, to)).with_code(code)
    }

    fn shape(records: &[SampleInterval]) -> Vec<(f64, f64, Option<&str>)> {
        records
            .iter()
            .map(|s| (s.from().value(), s.to().value(), s.code()))
            .collect()
    }

    #[test]
    fn merges_consecutive_equal_codes() {
        let input = vec![
            layer("W", 0.0, 5.0, "A"),
            layer("W", 5.0, 9.0, "A"),
            layer("W", 9.0, 12.0, "B"),
        ];
        assert_eq!(
            shape(&unify_layers(&input, None)),
            vec![(0.0, 9.0, Some("A")), (9.0, 12.0, Some("B"))]
        );
    }

    #[test]
    fn separated_runs_stay_separate() {
        let input = vec![
            layer("W", 0.0, 1.0, "A"),
            layer("W", 1.0, 2.0, "B"),
            layer("W", 2.0, 3.0, "A"),
        ];
        assert_eq!(unify_layers(&input, None).len(), 3);
    }

    #[test]
    fn packets_collapse_to_target() {
        let input = vec![
            layer("W", 0.0, 2.0, "J1sn$"),
            layer("W", 2.0, 4.0, "J1sn@"),
            layer("W", 4.0, 7.5, "J1sn#"),
            layer("W", 7.5, 9.0, "J1dh"),
        ];
        assert_eq!(
            shape(&unify_layers(&input, Some("J1sn"))),
            vec![(0.0, 7.5, Some("J1sn")), (7.5, 9.0, Some("J1dh"))]
        );
        assert_eq!(unify_layers(&input, None).len(), 4);
    }

    #[test]
    fn first_member_attributes_are_kept() {
        let input = vec![
            layer("W", 0.0, 1.0, "A").with_attribute("sample_no", "first"),
            layer("W", 1.0, 2.0, "A").with_attribute("sample_no", "second"),
        ];
        let merged = unify_layers(&input, None);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].attributes().get("sample_no"), Some("first"));
    }

    #[test]
    fn unsorted_input_is_ordered_per_well() {
        let input = vec![
            layer("W", 5.0, 9.0, "A"),
            layer("V", 0.0, 1.0, "A"),
            layer("W", 0.0, 5.0, "A"),
        ];
        let merged = unify_layers(&input, None);
        let wells: Vec<&str> = merged.iter().map(|s| s.well()).collect();
        assert_eq!(wells, vec!["W", "V"]);
        assert_eq!(merged[0].from().value(), 0.0);
        assert_eq!(merged[0].to().value(), 9.0);
    }

    #[test]
    fn missing_codes_merge_together() {
        let a = SampleInterval::new("W", DepthInterval::from_f64(0.0, 1.0));
        let b = SampleInterval::new("W", DepthInterval::from_f64(1.0, 2.0));
        assert_eq!(shape(&unify_layers(&[a, b], None)), vec![(0.0, 2.0, None)]);
    }

    #[test]
    fn nested_member_does_not_shrink_layer() {
        let input = vec![layer("W", 0.0, 10.0, "A"), layer("W", 2.0, 3.0, "A")];
        assert_eq!(
            shape(&unify_layers(&input, None)),
            vec![(0.0, 10.0, Some("A"))]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(unify_layers(&[], Some("J1sn")).is_empty());
    }

    #[test]
    fn select_layers_exact_or_nested() {
        let input = vec![
            layer("W", 0.0, 2.0, "J1sn"),
            layer("W", 2.0, 4.0, "J1sn@"),
            layer("W", 4.0, 6.0, "J1dh"),
            SampleInterval::new("W", DepthInterval::from_f64(6.0, 7.0)),
        ];
        assert_eq!(
            shape(&select_layers(&input, "J1sn", true)),
            vec![(0.0, 2.0, Some("J1sn"))]
        );
        assert_eq!(select_layers(&input, "J1sn", false).len(), 2);
    }

    #[test]
    fn interbedded_layers_are_counted_per_well() {
        let input = vec![
            layer("W", 0.0, 2.0, "J1sn"),
            layer("V", 1.0, 3.0, "J1sn"),
            layer("W", 5.0, 6.0, "J1sn"),
        ];
        let counted = count_layers(input, "layers");
        let counts: Vec<(&str, Option<&str>)> = counted
            .iter()
            .map(|s| (s.well(), s.attributes().get("layers")))
            .collect();
        assert_eq!(
            counts,
            vec![("W", Some("2")), ("V", Some("1")), ("W", Some("2"))]
        );
    }

    #[test]
    fn highlight_clears_finds_outside_target_age() {
        let input = vec![
            layer("W", 0.0, 1.0, "J1sn$").with_finds(3.0),
            layer("W", 1.0, 2.0, "J1dh").with_finds(2.0),
            layer("W", 2.0, 3.0, "J1dh"),
            SampleInterval::new("W", DepthInterval::from_f64(3.0, 4.0)).with_finds(1.0),
        ];
        let finds: Vec<f64> = highlight_by_age(&input, "J1sn")
            .iter()
            .map(|s| s.finds())
            .collect();
        assert_eq!(finds, vec![3.0, 0.0, 0.0, 0.0]);
        assert_eq!(highlight_by_age(&input, ""), input);
    }

    #[test]
    fn empty_target_is_a_no_op() {
        let input = vec![layer("W", 0.0, 1.0, "J1sn$")];
        assert_eq!(normalize_packets(&input, ""), input);
    }
}
