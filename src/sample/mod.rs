//! Per-well records: sample intervals, generated points and collar elevations.

mod attributes;
mod point;
mod record;
mod well;

pub use attributes::Attributes;
pub use point::GeneratedPoint;
pub use record::SampleInterval;
pub use well::Elevations;

use std::collections::HashMap;

use crate::WellId;

/// Splits mixed-well records into per-well groups.
///
/// Wells appear in order of their first record; records keep their input
/// order inside a group.
pub fn group_by_well(records: &[SampleInterval]) -> Vec<(WellId, Vec<SampleInterval>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(WellId, Vec<SampleInterval>)> = Vec::new();
    for record in records {
        match index.get(record.well()) {
            Some(&slot) => groups[slot].1.push(record.clone()),
            None => {
                index.insert(record.well(), groups.len());
                groups.push((record.well().to_string(), vec![record.clone()]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::DepthInterval;

    #[test]
    fn groups_keep_first_appearance_order() {
        let r = |well: &str, from: f64| {
            SampleInterval::new(well, DepthInterval::from_f64(from, from + 1.0))
        };
        let groups = group_by_well(&[r("B", 0.0), r("A", 0.0), r("B", 1.0)]);
        let shape: Vec<(&str, usize)> = groups
            .iter()
            .map(|(w, g)| (w.as_str(), g.len()))
            .collect();
        assert_eq!(shape, vec![("B", 2), ("A", 1)]);
        assert_eq!(groups[0].1[1].from().value(), 1.0);
    }

    #[test]
    fn many_wells_keep_their_records() {
        let records: Vec<SampleInterval> = (0..500)
            .map(|i| {
                let well = format!("W{}", i % 250);
                SampleInterval::new(well, DepthInterval::from_f64(i as f64, i as f64 + 1.0))
            })
            .collect();
        let groups = group_by_well(&records);
        assert_eq!(groups.len(), 250);
        assert_eq!(groups[0].0, "W0");
        assert_eq!(groups[249].0, "W249");
        assert!(groups.iter().all(|(_, g)| g.len() == 2));
        assert_eq!(groups[3].1[1].from().value(), 253.0);
    }
}
