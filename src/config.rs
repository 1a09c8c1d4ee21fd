//! Typed task parameters, validated once before a batch runs.

use thiserror::Error;

use crate::resolve::ResolveStrategy;

/// Errors raised by [`PipelineConfig::validate`] and its parts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Column name for {field} is empty")]
    EmptyColumnName { field: &'static str },

    #[error("Column '{0}' is mapped to more than one field")]
    DuplicateColumn(String),

    #[error("Point frequency must be at least 1")]
    ZeroFrequency,

    #[error("Packet target code is empty")]
    EmptyPacketTarget,

    #[error("Target code for {stage} is empty")]
    EmptyTarget { stage: &'static str },

    #[error("Sentinel {field} must be finite, got {value}")]
    NonFiniteSentinel { field: &'static str, value: f64 },

    #[error("Sentinel depths are inverted: from {from} is deeper than to {to}")]
    InvertedSentinels { from: f64, to: f64 },
}

/// Header names of the columns the algorithms read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnNames {
    /// Well identifier.
    pub well: String,
    /// Top depth offset of the sample.
    pub from: String,
    /// Bottom depth offset of the sample.
    pub to: String,
    /// Number of finds; `> 0` marks the sample as occupied.
    pub finds: String,
    /// Stratigraphic code, only needed by the unifier.
    pub code: String,
    /// Collar elevation of the well.
    pub elevation: String,
}

impl ColumnNames {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("well", &self.well),
            ("from", &self.from),
            ("to", &self.to),
            ("finds", &self.finds),
            ("code", &self.code),
            ("elevation", &self.elevation),
        ];
        for (i, (field, name)) in fields.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyColumnName { field: *field });
            }
            if fields[..i].iter().any(|(_, other)| other == name) {
                return Err(ConfigError::DuplicateColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            well: "ID".to_string(),
            from: "From".to_string(),
            to: "To".to_string(),
            finds: "Finds".to_string(),
            code: "Code".to_string(),
            elevation: "Z".to_string(),
        }
    }
}

/// Values substituted for missing or unreadable numbers.
///
/// The defaults sit well below any real sampling depth so that substituted
/// rows are easy to spot in the exported model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sentinels {
    pub from: f64,
    pub to: f64,
    pub elevation: f64,
    pub finds: f64,
}

impl Sentinels {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("from", self.from),
            ("to", self.to),
            ("elevation", self.elevation),
            ("finds", self.finds),
        ];
        if let Some(&(field, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFiniteSentinel { field, value });
        }
        if self.from > self.to {
            return Err(ConfigError::InvertedSentinels {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            from: 1000.0,
            to: 1100.0,
            elevation: 2000.0,
            finds: 0.0,
        }
    }
}

/// Parameters of the stratigraphic layer unifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnifyConfig {
    /// Parent code that every containing sub-code is folded into.
    pub packet_target: Option<String>,
}

impl UnifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.packet_target {
            Some(target) if target.is_empty() => Err(ConfigError::EmptyPacketTarget),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveConfig {
    pub strategy: ResolveStrategy,
}

/// Parameters of the point densifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DensifyConfig {
    /// Segments per metre multiplier, at least 1.
    pub frequency: u32,
    /// Output column receiving each point's depth offset.
    pub offset_column: String,
    /// Output column receiving each point's absolute elevation.
    pub elevation_column: String,
}

impl DensifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.offset_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "offset_column",
            });
        }
        if self.elevation_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "elevation_column",
            });
        }
        Ok(())
    }
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            frequency: 1,
            offset_column: "generateZ".to_string(),
            elevation_column: "Z".to_string(),
        }
    }
}

/// Clears finds on occupied samples outside one stratigraphic age.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HighlightConfig {
    /// Age code a sample's code must contain to keep its finds.
    pub target: String,
}

impl HighlightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget { stage: "highlight" });
        }
        Ok(())
    }
}

/// Roof and sole rows for the layers of one stratigraphic code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetLayerConfig {
    /// Code of the layers to keep.
    pub target: String,
    /// Output column receiving the per-well layer count.
    pub count_column: String,
}

impl TargetLayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget {
                stage: "target layers",
            });
        }
        if self.count_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "count_column",
            });
        }
        Ok(())
    }
}

impl Default for TargetLayerConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            count_column: "layers".to_string(),
        }
    }
}

/// One row per well with the elevations of its sampled section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WellBoundsConfig {
    /// Output column for the elevation of the shallowest sample top.
    pub top_column: String,
    /// Output column for the elevation of the deepest sample bottom.
    pub bottom_column: String,
}

impl WellBoundsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName { field: "top_column" });
        }
        if self.bottom_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "bottom_column",
            });
        }
        if self.top_column == self.bottom_column {
            return Err(ConfigError::DuplicateColumn(self.top_column.clone()));
        }
        Ok(())
    }
}

impl Default for WellBoundsConfig {
    fn default() -> Self {
        Self {
            top_column: "Z".to_string(),
            bottom_column: "D".to_string(),
        }
    }
}

/// What the pipeline writes for each well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputMode {
    /// Resolved samples as densified points, or midpoints without densify.
    #[default]
    Samples,
    /// Roof and sole elevations of the target code's layers.
    TargetLayers(TargetLayerConfig),
    /// Top and bottom of each well's sampled section.
    WellBounds(WellBoundsConfig),
}

impl OutputMode {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Samples => Ok(()),
            Self::TargetLayers(layers) => layers.validate(),
            Self::WellBounds(bounds) => bounds.validate(),
        }
    }
}

/// Full description of one batch run.
///
/// A stage set to `None` is skipped. Unify and highlight run in every
/// mode; resolve and densify only shape [`OutputMode::Samples`]. Without
/// densification every interval yields one row carrying its midpoint
/// elevation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    // --- Input ---
    pub columns: ColumnNames,
    pub sentinels: Sentinels,

    // --- Stages ---
    pub unify: Option<UnifyConfig>,
    pub highlight: Option<HighlightConfig>,
    pub resolve: Option<ResolveConfig>,
    pub densify: Option<DensifyConfig>,

    // --- Output ---
    pub mode: OutputMode,
    /// Column receiving the midpoint elevation when densification is off.
    pub midpoint_column: String,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.columns.validate()?;
        self.sentinels.validate()?;
        if let Some(unify) = &self.unify {
            unify.validate()?;
        }
        if let Some(highlight) = &self.highlight {
            highlight.validate()?;
        }
        if let Some(densify) = &self.densify {
            densify.validate()?;
        }
        self.mode.validate()?;
        if self.midpoint_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "midpoint_column",
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            sentinels: Sentinels::default(),
            unify: None,
            highlight: None,
            resolve: Some(ResolveConfig::default()),
            densify: Some(DensifyConfig::default()),
            mode: OutputMode::Samples,
            midpoint_column: "averageZ".to_string(),
        }
    }
}
