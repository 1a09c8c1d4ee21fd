use crate::units::{format_metres, Depth, Elevation};

use super::{Attributes, SampleInterval};

/// A synthetic point placed inside a sample interval by the densifier.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPoint {
    source: SampleInterval,
    offset: Depth,
    elevation: Elevation,
}

impl GeneratedPoint {
    pub(crate) fn new(source: SampleInterval, offset: Depth, elevation: Elevation) -> Self {
        Self {
            source,
            offset,
            elevation,
        }
    }

    /// The interval this point was generated from.
    pub fn source(&self) -> &SampleInterval {
        &self.source
    }

    pub fn well(&self) -> &str {
        self.source.well()
    }

    /// Depth offset of the point below the collar.
    pub fn offset(&self) -> Depth {
        self.offset
    }

    /// `Z - offset`, rounded to centimetres.
    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    /// Source attributes with the offset and elevation attached as columns.
    pub fn attributes(&self, offset_column: &str, elevation_column: &str) -> Attributes {
        self.source
            .attributes()
            .clone()
            .with(offset_column, format_metres(self.offset.value()))
            .with(elevation_column, format_metres(self.elevation.value()))
    }
}
