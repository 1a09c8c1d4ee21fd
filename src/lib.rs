//! boregeo - borehole interval geometry
//!
//! Converts per-well sampling intervals into point sets for mine-modelling
//! software. The core is 1-D interval geometry over depth offsets:
//!
//! - [`resolve`] removes occupied depth from empty sample intervals.
//! - [`densify`] expands an interval into evenly spaced elevation points.
//! - [`unify`] merges consecutive intervals sharing a stratigraphic code.
//!
//! [`table`] reads and writes the semicolon-delimited text tables and
//! [`pipeline`] chains the stages over a whole table, well by well.

pub mod bounds;
pub mod config;
pub mod densify;
pub mod error;
pub mod interval;
pub mod pipeline;
pub mod resolve;
pub mod sample;
pub mod table;
pub mod unify;
pub mod units;

pub use config::{OutputMode, PipelineConfig};
pub use densify::densify;
pub use error::{GeoError, Result, TaskError};
pub use interval::{DepthInterval, DepthSet};
pub use pipeline::{BatchReport, NoProgress, Pipeline, Progress};
pub use resolve::{resolve_overlaps, resolve_overlaps_legacy, ResolveStrategy};
pub use sample::{Elevations, GeneratedPoint, SampleInterval};
pub use unify::{highlight_by_age, unify_layers};

/// Identifier of a well (borehole) as it appears in the input table.
pub type WellId = String;
