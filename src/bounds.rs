//! Top and bottom elevations of sampled sections and single layers.

use crate::interval::DepthInterval;
use crate::sample::SampleInterval;
use crate::units::{absolute_elevation, Depth, Elevation};

/// Absolute elevations bracketing every sample of one well.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingBounds {
    /// Elevation of the shallowest `from`.
    pub top: Elevation,
    /// Elevation of the deepest `to`.
    pub bottom: Elevation,
}

/// Roof and sole elevation of a single interval against collar `z`.
pub fn interval_bounds(interval: &DepthInterval, z: Elevation) -> SamplingBounds {
    SamplingBounds {
        top: absolute_elevation(z, interval.from()),
        bottom: absolute_elevation(z, interval.to()),
    }
}

/// Computes the sampled section of a well against collar `z`.
///
/// Returns `None` when the well has no samples.
pub fn sampling_bounds(well_intervals: &[SampleInterval], z: Elevation) -> Option<SamplingBounds> {
    let shallowest = well_intervals
        .iter()
        .map(|s| s.from().value())
        .min_by(f64::total_cmp)?;
    let deepest = well_intervals
        .iter()
        .map(|s| s.to().value())
        .max_by(f64::total_cmp)?;

    let section = DepthInterval::try_new(Depth::new(shallowest), Depth::new(deepest)).ok()?;
    Some(interval_bounds(&section, z))
}
