//! Half-open depth interval along a borehole.

use std::fmt::Display;

use qtty::Quantity;

use crate::error::IntervalError;
use crate::units::{round2, Depth};

/// Depth range `[from, to)` in metres below the collar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthInterval {
    from: Depth,
    to: Depth,
}

impl DepthInterval {
    /// Creates interval `[from, to)`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`.
    pub const fn new(from: Depth, to: Depth) -> Self {
        assert!(from.value() <= to.value(), "Interval from must be <= to");
        Self { from, to }
    }

    pub const fn from_f64(from: f64, to: f64) -> Self {
        Self::new(Quantity::new(from), Quantity::new(to))
    }

    /// Fallible constructor for values coming from input tables.
    pub fn try_new(from: Depth, to: Depth) -> Result<Self, IntervalError> {
        if from.value().is_nan() || to.value().is_nan() {
            return Err(IntervalError::NaNDepth);
        }
        if from.value() > to.value() {
            return Err(IntervalError::Inverted {
                from: from.value(),
                to: to.value(),
            });
        }
        Ok(Self { from, to })
    }

    pub const fn from(&self) -> Depth {
        self.from
    }

    pub const fn to(&self) -> Depth {
        self.to
    }

    pub fn length(&self) -> Depth {
        self.to - self.from
    }

    /// Length rounded to centimetres.
    pub fn rounded_length(&self) -> f64 {
        round2(self.to.value() - self.from.value())
    }

    /// True when the interval spans no depth at all.
    pub const fn is_degenerate(&self) -> bool {
        self.from.value() >= self.to.value()
    }

    /// Checks whether the two ranges share more than a boundary point.
    pub const fn overlaps(&self, other: &DepthInterval) -> bool {
        self.from.value() < other.to.value() && other.from.value() < self.to.value()
    }
}

impl Display for DepthInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.2}, {:.2})", self.from.value(), self.to.value())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for DepthInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("DepthInterval", 2)?;
        s.serialize_field("from", &self.from.value())?;
        s.serialize_field("to", &self.to.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DepthInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            from: f64,
            to: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(Depth::new(raw.from), Depth::new(raw.to)).map_err(serde::de::Error::custom)
    }
}
