//! Sample interval record.

use crate::interval::DepthInterval;
use crate::units::Depth;
use crate::WellId;

use super::Attributes;

/// One sampled depth range of a well together with everything read for it.
///
/// Records are values: the `with_*` methods consume `self` and return the
/// changed copy instead of mutating shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleInterval {
    well: WellId,
    interval: DepthInterval,
    finds: f64,
    code: Option<String>,
    attributes: Attributes,
}

impl SampleInterval {
    /// Creates an empty (zero finds) record without code or attributes.
    pub fn new(well: impl Into<WellId>, interval: DepthInterval) -> Self {
        Self {
            well: well.into(),
            interval,
            finds: 0.0,
            code: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_interval(mut self, interval: DepthInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_finds(mut self, finds: f64) -> Self {
        self.finds = finds;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn without_code(mut self) -> Self {
        self.code = None;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn well(&self) -> &str {
        &self.well
    }

    pub fn interval(&self) -> DepthInterval {
        self.interval
    }

    pub fn from(&self) -> Depth {
        self.interval.from()
    }

    pub fn to(&self) -> Depth {
        self.interval.to()
    }

    pub fn finds(&self) -> f64 {
        self.finds
    }

    /// Occupied samples recorded at least one find.
    pub fn is_occupied(&self) -> bool {
        self.finds > 0.0
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
