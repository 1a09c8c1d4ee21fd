//! Well collar elevations.

use std::collections::HashMap;

use tracing::warn;

use crate::units::Elevation;
use crate::WellId;

/// Lookup from well ID to the absolute elevation of its collar.
#[derive(Debug, Clone, Default)]
pub struct Elevations {
    by_well: HashMap<WellId, Elevation>,
}

impl Elevations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the collar elevation of a well; the first value wins.
    pub fn insert(&mut self, well: impl Into<WellId>, z: Elevation) {
        self.by_well.entry(well.into()).or_insert(z);
    }

    pub fn get(&self, well: &str) -> Option<Elevation> {
        self.by_well.get(well).copied()
    }

    /// Returns the elevation of `well`, or `fallback` when none was read.
    pub fn resolve(&self, well: &str, fallback: Elevation) -> Elevation {
        match self.get(well) {
            Some(z) => z,
            None => {
                warn!(
                    well = %well,
                    fallback = fallback.value(),
                    "No collar elevation for well, using sentinel"
                );
                fallback
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_well.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_well.is_empty()
    }
}

impl<W: Into<WellId>> FromIterator<(W, Elevation)> for Elevations {
    fn from_iter<I: IntoIterator<Item = (W, Elevation)>>(iter: I) -> Self {
        let mut elevations = Self::new();
        for (well, z) in iter {
            elevations.insert(well, z);
        }
        elevations
    }
}
