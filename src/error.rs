use thiserror::Error;

use crate::config::ConfigError;
use crate::table::TableError;
use crate::WellId;

/// Errors raised when constructing a depth interval from raw values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntervalError {
    #[error("Depth value cannot be NaN")]
    NaNDepth,

    #[error("Interval is inverted: from {from} is deeper than to {to}")]
    Inverted { from: f64, to: f64 },
}

/// Errors raised by the point densifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DensifyError {
    #[error("Point frequency must be at least 1")]
    ZeroFrequency,
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid interval: {0}")]
    Interval(#[from] IntervalError),

    #[error("Densification failed: {0}")]
    Densify(#[from] DensifyError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A failure while transforming one well, tagged with the well it came from.
///
/// The batch driver records these and moves on to the next well.
#[derive(Debug, Error)]
#[error("Well {well}: {source}")]
pub struct TaskError {
    pub well: WellId,
    #[source]
    pub source: GeoError,
}

impl TaskError {
    pub fn new(well: impl Into<WellId>, source: impl Into<GeoError>) -> Self {
        Self {
            well: well.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
