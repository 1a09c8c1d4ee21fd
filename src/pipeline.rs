//! Batch driver running the interval stages well by well.

use std::io::Write;

use tracing::{debug, error, info};

use crate::bounds::{interval_bounds, sampling_bounds, SamplingBounds};
use crate::config::{OutputMode, PipelineConfig, TargetLayerConfig, WellBoundsConfig};
use crate::densify::{densify, midpoint_elevation};
use crate::error::{GeoError, Result, TaskError};
use crate::resolve::resolve_with;
use crate::sample::{Attributes, Elevations, SampleInterval};
use crate::table::{output_columns, point_row, record_row, TableError, TableWriter, WellTable};
use crate::unify::{count_layers, highlight_by_age, select_layers, unify_layers};
use crate::units::{format_metres, Elevation};

/// Receives `(wells_done, wells_total)` after every well.
pub trait Progress {
    fn update(&mut self, done: usize, total: usize);
}

/// Progress sink that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _done: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn update(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}

/// Output of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output column order.
    pub columns: Vec<String>,
    /// One row per generated point, or per interval without densification.
    pub rows: Vec<Attributes>,
    /// Wells that could not be transformed; their rows are absent.
    pub failures: Vec<TaskError>,
    pub wells_processed: usize,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Writes the header and all rows through a [`TableWriter`].
    pub fn write_to<W: Write>(&self, out: W) -> std::result::Result<W, TableError> {
        let mut writer = TableWriter::new(out, self.columns.clone())?;
        writer.write_rows(&self.rows)?;
        writer.into_inner()
    }
}

/// Runs the configured stages over every well of a table.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validates `config` once; a valid pipeline never re-checks it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes all wells of `table` in ID order.
    ///
    /// A well that fails is recorded in [`BatchReport::failures`] and the
    /// run moves on. Only table-wide problems, such as a missing code
    /// column while a code-driven stage is enabled, abort the run.
    pub fn run(
        &self,
        table: &WellTable,
        elevations: &Elevations,
        progress: &mut dyn Progress,
    ) -> Result<BatchReport> {
        if self.needs_code() {
            table.schema().require_code(&self.config.columns)?;
        }

        let total = table.len();
        let mut report = BatchReport {
            columns: self.output_columns(table.schema().columns()),
            ..BatchReport::default()
        };
        info!(wells = total, "Starting batch");

        for (done, (well, intervals)) in table.wells().enumerate() {
            let outcome = match table.rejection(well) {
                Some(rejection) => Err(GeoError::from(rejection)),
                None => {
                    let fallback = Elevation::new(self.config.sentinels.elevation);
                    self.process_well(intervals, elevations.resolve(well, fallback))
                }
            };
            match outcome {
                Ok(rows) => {
                    debug!(well = %well, rows = rows.len(), "Well processed");
                    report.rows.extend(rows);
                    report.wells_processed += 1;
                }
                Err(source) => {
                    let failure = TaskError::new(well, source);
                    error!(well = %well, error = %failure, "Well failed, skipping");
                    report.failures.push(failure);
                }
            }
            progress.update(done + 1, total);
        }

        info!(
            wells = report.wells_processed,
            failed = report.failures.len(),
            rows = report.rows.len(),
            "Batch finished"
        );
        Ok(report)
    }

    /// Runs every enabled stage over one well's intervals.
    pub fn process_well(
        &self,
        intervals: &[SampleInterval],
        z: Elevation,
    ) -> Result<Vec<Attributes>> {
        let cfg = &self.config;
        let mut records = intervals.to_vec();
        if let Some(unify) = &cfg.unify {
            records = unify_layers(&records, unify.packet_target.as_deref());
        }
        if let Some(highlight) = &cfg.highlight {
            records = highlight_by_age(&records, &highlight.target);
        }

        match &cfg.mode {
            OutputMode::Samples => self.sample_rows(records, z),
            OutputMode::TargetLayers(layers) => Ok(self.layer_rows(&records, z, layers)),
            OutputMode::WellBounds(bounds) => Ok(self.bounds_rows(&records, z, bounds)),
        }
    }

    fn sample_rows(
        &self,
        records: Vec<SampleInterval>,
        z: Elevation,
    ) -> Result<Vec<Attributes>> {
        let cfg = &self.config;
        let records = match &cfg.resolve {
            Some(resolve) => resolve_with(&records, resolve.strategy),
            None => records,
        };

        let mut rows = Vec::with_capacity(records.len());
        match &cfg.densify {
            Some(d) => {
                for record in &records {
                    for point in densify(record, z, d.frequency)? {
                        rows.push(point_row(
                            &point,
                            &cfg.columns,
                            &d.offset_column,
                            &d.elevation_column,
                        ));
                    }
                }
            }
            None => {
                for record in &records {
                    let midpoint = midpoint_elevation(&record.interval(), z);
                    let row = record_row(record, &cfg.columns)
                        .with(cfg.midpoint_column.as_str(), format_metres(midpoint.value()));
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }

    /// Target layers with `From`/`To` replaced by roof and sole elevations.
    fn layer_rows(
        &self,
        records: &[SampleInterval],
        z: Elevation,
        layers: &TargetLayerConfig,
    ) -> Vec<Attributes> {
        let columns = &self.config.columns;
        let exact = self
            .config
            .unify
            .as_ref()
            .and_then(|u| u.packet_target.as_deref())
            == Some(layers.target.as_str());
        let selected = count_layers(
            select_layers(records, &layers.target, exact),
            &layers.count_column,
        );
        selected
            .iter()
            .map(|layer| {
                let SamplingBounds { top, bottom } = interval_bounds(&layer.interval(), z);
                record_row(layer, columns)
                    .with(columns.from.as_str(), format_metres(top.value()))
                    .with(columns.to.as_str(), format_metres(bottom.value()))
            })
            .collect()
    }

    /// One row for the well, taken from its shallowest sample.
    fn bounds_rows(
        &self,
        records: &[SampleInterval],
        z: Elevation,
        bounds: &WellBoundsConfig,
    ) -> Vec<Attributes> {
        let columns = &self.config.columns;
        let first = records
            .iter()
            .min_by(|a, b| a.from().value().total_cmp(&b.from().value()));
        match (first, sampling_bounds(records, z)) {
            (Some(first), Some(section)) => {
                let mut row = record_row(first, columns)
                    .with(bounds.top_column.as_str(), format_metres(section.top.value()))
                    .with(
                        bounds.bottom_column.as_str(),
                        format_metres(section.bottom.value()),
                    );
                row.remove(&columns.from);
                row.remove(&columns.to);
                vec![row]
            }
            _ => Vec::new(),
        }
    }

    fn output_columns(&self, header: &[String]) -> Vec<String> {
        let cfg = &self.config;
        match &cfg.mode {
            OutputMode::Samples => match &cfg.densify {
                Some(d) => output_columns(
                    header,
                    &[d.offset_column.as_str(), d.elevation_column.as_str()],
                ),
                None => output_columns(header, &[cfg.midpoint_column.as_str()]),
            },
            OutputMode::TargetLayers(layers) => {
                output_columns(header, &[layers.count_column.as_str()])
            }
            OutputMode::WellBounds(bounds) => {
                let kept: Vec<String> = header
                    .iter()
                    .filter(|c| **c != cfg.columns.from && **c != cfg.columns.to)
                    .cloned()
                    .collect();
                output_columns(
                    &kept,
                    &[bounds.top_column.as_str(), bounds.bottom_column.as_str()],
                )
            }
        }
    }

    fn needs_code(&self) -> bool {
        self.config.unify.is_some()
            || self.config.highlight.is_some()
            || matches!(self.config.mode, OutputMode::TargetLayers(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DensifyConfig, HighlightConfig, UnifyConfig};
    use crate::interval::DepthInterval;

    fn sample(from: f64, to: f64, finds: f64) -> SampleInterval {
        SampleInterval::new("W", DepthInterval::from_f64(from, to)).with_finds(finds)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PipelineConfig {
            densify: Some(DensifyConfig {
                frequency: 0,
                ..DensifyConfig::default()
            }),
            ..PipelineConfig::default()
        };
        assert!(matches!(Pipeline::new(config), Err(GeoError::Config(_))));
    }

    #[test]
    fn process_well_resolves_then_densifies() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let intervals = [sample(1.0, 2.0, 1.0), sample(0.0, 3.0, 0.0)];
        let rows = pipeline
            .process_well(&intervals, Elevation::new(100.0))
            .unwrap();
        let offsets: Vec<&str> = rows.iter().filter_map(|r| r.get("generateZ")).collect();
        // [0,1) and [2,3) residuals, then the occupied [1,2).
        assert_eq!(offsets, vec!["0.0", "1.0", "2.0", "3.0", "1.0", "2.0"]);
        assert_eq!(rows[0].get("Z"), Some("100.0"));
        assert_eq!(rows[0].get("Finds"), Some("0.0"));
        assert_eq!(rows[5].get("Finds"), Some("1.0"));
    }

    #[test]
    fn midpoint_rows_without_densify() {
        let config = PipelineConfig {
            densify: None,
            resolve: None,
            unify: Some(UnifyConfig::default()),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let rows = pipeline
            .process_well(
                &[
                    sample(0.0, 1.0, 0.0).with_code("A"),
                    sample(1.0, 3.0, 0.0).with_code("A"),
                ],
                Elevation::new(10.0),
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("averageZ"), Some("8.5"));
        assert_eq!(rows[0].get("To"), Some("3.0"));
    }

    fn layers_config(target: &str, packet_target: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            unify: Some(UnifyConfig {
                packet_target: packet_target.map(str::to_string),
            }),
            mode: OutputMode::TargetLayers(TargetLayerConfig {
                target: target.to_string(),
                ..TargetLayerConfig::default()
            }),
            ..PipelineConfig::default()
        }
    }

    fn stratified() -> Vec<SampleInterval> {
        vec![
            sample(0.0, 2.0, 1.0).with_code("J1sn"),
            sample(2.0, 3.5, 0.0).with_code("J1sn2"),
            sample(3.5, 5.0, 0.0).with_code("K1"),
            sample(5.0, 6.25, 1.0).with_code("J1sn"),
        ]
    }

    #[test]
    fn target_layers_report_roof_and_sole() {
        let pipeline = Pipeline::new(layers_config("J1sn", None)).unwrap();
        let rows = pipeline
            .process_well(&stratified(), Elevation::new(120.0))
            .unwrap();
        let shape: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| {
                (
                    r.get("From").unwrap(),
                    r.get("To").unwrap(),
                    r.get("layers").unwrap(),
                )
            })
            .collect();
        // Without packet unification nested codes match too.
        assert_eq!(
            shape,
            vec![
                ("120.0", "118.0", "3"),
                ("118.0", "116.5", "3"),
                ("115.0", "113.75", "3"),
            ]
        );
    }

    #[test]
    fn unified_packets_select_target_exactly() {
        let pipeline = Pipeline::new(layers_config("J1sn", Some("J1sn"))).unwrap();
        let rows = pipeline
            .process_well(&stratified(), Elevation::new(120.0))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("Code") == Some("J1sn")));
        assert!(rows.iter().all(|r| r.get("layers") == Some("2")));
        assert_eq!(rows[0].get("To"), Some("116.5"));
    }

    #[test]
    fn highlight_runs_before_densify() {
        let config = PipelineConfig {
            highlight: Some(HighlightConfig {
                target: "K1".to_string(),
            }),
            densify: None,
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let rows = pipeline
            .process_well(
                &[
                    sample(0.0, 1.0, 1.0).with_code("J1"),
                    sample(1.0, 2.0, 1.0).with_code("K1al"),
                ],
                Elevation::new(10.0),
            )
            .unwrap();
        let finds: Vec<&str> = rows.iter().filter_map(|r| r.get("Finds")).collect();
        assert_eq!(finds, vec!["0.0", "1.0"]);
    }

    #[test]
    fn well_bounds_emit_one_row() {
        let config = PipelineConfig {
            mode: OutputMode::WellBounds(WellBoundsConfig::default()),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let intervals = [
            sample(4.0, 9.5, 0.0).with_attribute("MSD", "late"),
            sample(1.5, 4.0, 1.0).with_attribute("MSD", "early"),
        ];
        let rows = pipeline
            .process_well(&intervals, Elevation::new(80.0))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Z"), Some("78.5"));
        assert_eq!(rows[0].get("D"), Some("70.5"));
        assert_eq!(rows[0].get("MSD"), Some("early"));
        assert!(!rows[0].contains("From"));
        assert!(!rows[0].contains("To"));
        assert!(pipeline
            .process_well(&[], Elevation::new(80.0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn well_bounds_replace_depth_columns() {
        let config = PipelineConfig {
            mode: OutputMode::WellBounds(WellBoundsConfig::default()),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let header: Vec<String> = ["ID", "From", "To", "Z", "MSD"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            pipeline.output_columns(&header),
            vec!["ID", "Z", "MSD", "D"]
        );
    }

    #[test]
    fn closures_report_progress() {
        let mut seen = Vec::new();
        {
            let mut sink = |done: usize, total: usize| seen.push((done, total));
            let progress: &mut dyn Progress = &mut sink;
            progress.update(1, 2);
            progress.update(2, 2);
        }
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }
}
