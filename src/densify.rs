//! Interval densification into evenly spaced elevation points.
//!
//! An interval `[from, to]` is cut into `ceil(length)` one-metre-ish
//! segments (a single segment when it is a metre or shorter), multiplied by
//! the requested frequency. Every segment boundary becomes a point; the
//! first point is exactly `from` and the last exactly `to`, so a densified
//! interval always yields at least two points.
//!
//! ```
//! use boregeo::densify::densify;
//! use boregeo::interval::DepthInterval;
//! use boregeo::sample::SampleInterval;
//! use boregeo::units::Elevation;
//!
//! let sample = SampleInterval::new("W1", DepthInterval::from_f64(10.2, 10.6));
//! let points = densify(&sample, Elevation::new(250.0), 1).unwrap();
//! let offsets: Vec<f64> = points.iter().map(|p| p.offset().value()).collect();
//! assert_eq!(offsets, vec![10.2, 10.6]);
//! assert_eq!(points[1].elevation().value(), 239.4);
//! ```

use crate::error::DensifyError;
use crate::interval::DepthInterval;
use crate::sample::{GeneratedPoint, SampleInterval};
use crate::units::{absolute_elevation, round2, Depth, Elevation};

/// Number of segments an interval is cut into for the given frequency.
///
/// Never more than one segment per centimetre of rounded length, so the
/// step between points stays at or above `0.01`.
pub fn segment_count(interval: &DepthInterval, frequency: u32) -> Result<u32, DensifyError> {
    if frequency == 0 {
        return Err(DensifyError::ZeroFrequency);
    }
    let length = interval.rounded_length();
    let base = if length > 1.0 { length.ceil() as u32 } else { 1 };
    let finest = ((length * 100.0).round() as u32).max(1);
    Ok(base.saturating_mul(frequency).min(finest))
}

/// Depth offsets of the points generated inside `interval`.
///
/// Intermediate offsets are rounded to centimetres. An intermediate offset
/// that rounds onto its predecessor or onto `to` is dropped, so offsets of
/// a non-degenerate interval are strictly increasing.
pub fn offsets(interval: &DepthInterval, frequency: u32) -> Result<Vec<Depth>, DensifyError> {
    let segments = segment_count(interval, frequency)?;
    let from = interval.from();
    let to = interval.to();
    let step = round2(interval.rounded_length() / f64::from(segments));

    let mut out = Vec::with_capacity(segments as usize + 1);
    out.push(from);
    let mut last = from.value();
    for k in 1..segments {
        let offset = round2(from.value() + f64::from(k) * step);
        if offset <= last || offset >= to.value() {
            continue;
        }
        out.push(Depth::new(offset));
        last = offset;
    }
    out.push(to);
    Ok(out)
}

/// Expands one sample interval into points resolved against collar `well_z`.
///
/// Each point keeps the source record, attributes and finds included.
pub fn densify(
    interval: &SampleInterval,
    well_z: Elevation,
    frequency: u32,
) -> Result<Vec<GeneratedPoint>, DensifyError> {
    let points = offsets(&interval.interval(), frequency)?
        .into_iter()
        .map(|offset| {
            GeneratedPoint::new(interval.clone(), offset, absolute_elevation(well_z, offset))
        })
        .collect();
    Ok(points)
}

/// Elevation of the interval midpoint, used when points are not densified.
///
/// ```
/// use boregeo::densify::midpoint_elevation;
/// use boregeo::interval::DepthInterval;
/// use boregeo::units::Elevation;
///
/// let z = midpoint_elevation(&DepthInterval::from_f64(2.0, 3.0), Elevation::new(100.0));
/// assert_eq!(z.value(), 97.5);
/// ```
pub fn midpoint_elevation(interval: &DepthInterval, well_z: Elevation) -> Elevation {
    let z = well_z.value();
    let top = z - interval.from().value();
    let bottom = z - interval.to().value();
    Elevation::new(round2((top + bottom) / 2.0))
}
