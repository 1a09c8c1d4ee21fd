//! Length quantities and the centimetre rounding convention.
//!
//! Every depth offset and elevation in the crate is a [`qtty::Quantity`] in
//! metres. Derived values are reported to centimetre precision using
//! round-half-up on `value * 100`, the convention of the downstream
//! mine-modelling tools.

use qtty::{Meter, Quantity};

/// Depth offset measured down-hole from the well collar.
pub type Depth = Quantity<Meter>;

/// Absolute elevation (collar `Z` minus a depth offset).
pub type Elevation = Quantity<Meter>;

/// Rounds to two decimals, half-up on `value * 100`.
///
/// ```
/// use boregeo::units::round2;
///
/// assert_eq!(round2(1.005 + 1e-9), 1.01);
/// assert_eq!(round2(2.344), 2.34);
/// assert_eq!(round2(-0.125), -0.12);
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// [`round2`] lifted to a metre quantity.
#[inline]
pub fn round_depth(q: Depth) -> Depth {
    Depth::new(round2(q.value()))
}

/// Converts a depth offset into an absolute elevation against collar `z`.
///
/// ```
/// use boregeo::units::{absolute_elevation, Depth};
///
/// let elevation = absolute_elevation(Depth::new(250.0), Depth::new(12.344));
/// assert_eq!(elevation.value(), 237.66);
/// ```
#[inline]
pub fn absolute_elevation(z: Elevation, offset: Depth) -> Elevation {
    Elevation::new(round2(z.value() - offset.value()))
}

/// Formats a metre value the way the text tables expect: `.` separator and
/// at least one fractional digit (`12.0`, not `12`).
pub fn format_metres(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_exact_cents() {
        assert_eq!(round2(10.2), 10.2);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(123.45), 123.45);
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(7.777), 7.78);
        assert_eq!(round2(7.771), 7.77);
    }

    #[test]
    fn round2_negative_half_goes_towards_positive() {
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(-2.5), -2.5);
    }

    #[test]
    fn absolute_elevation_subtracts_and_rounds() {
        let z = Elevation::new(245.06);
        assert_eq!(absolute_elevation(z, Depth::new(10.0)).value(), 235.06);
        assert_eq!(absolute_elevation(z, Depth::new(0.333)).value(), 244.73);
    }

    #[test]
    fn format_metres_keeps_fraction() {
        assert_eq!(format_metres(12.0), "12.0");
        assert_eq!(format_metres(10.25), "10.25");
        assert_eq!(format_metres(-3.5), "-3.5");
    }
}
