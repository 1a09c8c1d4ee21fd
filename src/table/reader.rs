//! Reading a sampling table into per-well interval lists.

use std::collections::BTreeMap;
use std::io::BufRead;

use tracing::{debug, warn};

use crate::config::{ColumnNames, Sentinels};
use crate::error::IntervalError;
use crate::interval::DepthInterval;
use crate::sample::{Attributes, Elevations, SampleInterval};
use crate::units::{Depth, Elevation};
use crate::WellId;

use super::parse::{number_or_sentinel, parse_number};
use super::{Schema, TableError};

const DELIMITER: char = ';';

/// A sampling table grouped by well.
#[derive(Debug, Clone)]
pub struct WellTable {
    schema: Schema,
    wells: BTreeMap<WellId, Vec<SampleInterval>>,
    rejected: BTreeMap<WellId, (usize, IntervalError)>,
    dropped: Vec<usize>,
    elevations: Elevations,
}

impl WellTable {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Wells in ID order with their intervals in file order.
    pub fn wells(&self) -> impl Iterator<Item = (&str, &[SampleInterval])> {
        self.wells
            .iter()
            .map(|(well, intervals)| (well.as_str(), intervals.as_slice()))
    }

    pub fn well(&self, well: &str) -> Option<&[SampleInterval]> {
        self.wells.get(well).map(Vec::as_slice)
    }

    /// First invalid row of `well`, if any of its rows could not be read.
    pub fn rejection(&self, well: &str) -> Option<TableError> {
        self.rejected
            .get(well)
            .map(|(line, source)| TableError::InvalidInterval {
                line: *line,
                source: source.clone(),
            })
    }

    /// Collar elevations read from the elevation column, if the file has one.
    pub fn elevations(&self) -> &Elevations {
        &self.elevations
    }

    /// Number of wells, rejected ones included.
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Line numbers of rows skipped because a substituted depth inverted
    /// their interval.
    pub fn dropped_lines(&self) -> &[usize] {
        &self.dropped
    }

    pub fn record_count(&self) -> usize {
        self.wells.values().map(Vec::len).sum()
    }
}

/// Reads a semicolon-delimited table.
///
/// The first line is the header. Blank lines are skipped; every other line
/// must have exactly as many fields as the header. Unreadable numbers are
/// replaced by `sentinels`. A row whose own bounds are inverted marks its
/// well as rejected instead of failing the whole table; a row that is only
/// inverted because one depth fell back to its sentinel is skipped alone.
pub fn read_table<R: BufRead>(
    reader: R,
    names: &ColumnNames,
    sentinels: &Sentinels,
) -> Result<WellTable, TableError> {
    let mut lines = reader.lines();
    let header_line = lines.next().ok_or(TableError::Empty)??;
    let header = split_row(header_line.trim_start_matches('\u{feff}'));
    let schema = Schema::resolve(&header, names)?;

    let mut table = WellTable {
        schema,
        wells: BTreeMap::new(),
        rejected: BTreeMap::new(),
        dropped: Vec::new(),
        elevations: Elevations::new(),
    };

    for (index, line) in lines.enumerate() {
        let line_no = index + 2;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(&line);
        if cells.len() != table.schema.width() {
            return Err(TableError::FieldCount {
                line: line_no,
                expected: table.schema.width(),
                found: cells.len(),
            });
        }
        table.push_row(&cells, line_no, sentinels);
    }

    debug!(
        wells = table.len(),
        records = table.record_count(),
        rejected = table.rejected.len(),
        dropped = table.dropped.len(),
        "Read sampling table"
    );
    Ok(table)
}

impl WellTable {
    fn push_row(&mut self, cells: &[String], line: usize, sentinels: &Sentinels) {
        let schema = &self.schema;
        let columns = schema.columns();
        let well = cells[schema.well()].clone();

        if let Some(index) = schema.elevation() {
            if let Some(z) = parse_number(&cells[index]) {
                self.elevations.insert(well.clone(), Elevation::new(z));
            }
        }

        let number = |index: usize, sentinel: f64| {
            number_or_sentinel(&cells[index], sentinel, line, &columns[index])
        };
        let from = number(schema.from(), sentinels.from);
        let to = number(schema.to(), sentinels.to);
        let finds = number(schema.finds(), sentinels.finds);

        let substituted = parse_number(&cells[schema.from()]).is_none()
            || parse_number(&cells[schema.to()]).is_none();

        let interval = match DepthInterval::try_new(Depth::new(from), Depth::new(to)) {
            Ok(interval) => interval,
            Err(source) if substituted => {
                warn!(
                    well = %well,
                    line,
                    error = %source,
                    "Skipping row whose sentinel depth inverts the interval"
                );
                self.wells.entry(well).or_default();
                self.dropped.push(line);
                return;
            }
            Err(source) => {
                warn!(
                    well = %well,
                    line,
                    error = %source,
                    "Rejecting well with invalid interval"
                );
                self.wells.entry(well.clone()).or_default();
                self.rejected.entry(well).or_insert((line, source));
                return;
            }
        };

        let attributes: Attributes = cells
            .iter()
            .enumerate()
            .filter(|(i, _)| !schema.is_core(*i))
            .map(|(i, value)| (columns[i].clone(), value.clone()))
            .collect();

        let mut record = SampleInterval::new(well.clone(), interval)
            .with_finds(finds)
            .with_attributes(attributes);
        if let Some(code) = schema.code().map(|i| cells[i].trim()) {
            if !code.is_empty() {
                record = record.with_code(code);
            }
        }
        self.wells.entry(well).or_default().push(record);
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
ID;X;From;To;Finds;Code;Z
W2;100,5;0;1,5;2;J1sn$;250
W1;10;3;4;0;J1dh;245,06
W2;100,5;1,5;2;;J1sn@;250

W1;10;;;1;J1dh;-999999.0
";

    fn read(text: &str) -> Result<WellTable, TableError> {
        read_table(text.as_bytes(), &ColumnNames::default(), &Sentinels::default())
    }

    #[test]
    fn groups_rows_by_well_in_id_order() {
        let table = read(TABLE).unwrap();
        let wells: Vec<(&str, usize)> = table
            .wells()
            .map(|(w, r)| (w, r.len()))
            .collect();
        assert_eq!(wells, vec![("W1", 2), ("W2", 2)]);
        assert_eq!(table.record_count(), 4);
    }

    #[test]
    fn parses_core_fields_and_keeps_other_columns() {
        let table = read(TABLE).unwrap();
        let first = &table.well("W2").unwrap()[0];
        assert_eq!(first.from().value(), 0.0);
        assert_eq!(first.to().value(), 1.5);
        assert_eq!(first.finds(), 2.0);
        assert_eq!(first.code(), Some("J1sn$"));
        assert_eq!(first.attributes().get("X"), Some("100,5"));
        assert_eq!(first.attributes().get("Z"), Some("250"));
        assert!(!first.attributes().contains("From"));
        assert!(!first.attributes().contains("Code"));
    }

    #[test]
    fn missing_numbers_become_sentinels() {
        let table = read(TABLE).unwrap();
        let w2 = table.well("W2").unwrap();
        assert_eq!(w2[1].finds(), 0.0);
        let w1 = table.well("W1").unwrap();
        assert_eq!(w1[1].from().value(), 1000.0);
        assert_eq!(w1[1].to().value(), 1100.0);
        assert!(table.rejection("W1").is_none());
    }

    #[test]
    fn elevations_skip_markers_and_keep_first() {
        let table = read(TABLE).unwrap();
        assert_eq!(table.elevations().get("W1").map(|z| z.value()), Some(245.06));
        assert_eq!(table.elevations().get("W2").map(|z| z.value()), Some(250.0));
    }

    #[test]
    fn inverted_row_rejects_only_its_well() {
        let text = "ID;From;To;Finds\nA;5;1;0\nA;6;7;0\nB;0;1;1\n";
        let table = read(text).unwrap();
        assert!(matches!(
            table.rejection("A"),
            Some(TableError::InvalidInterval { line: 2, .. })
        ));
        assert!(table.rejection("B").is_none());
        assert_eq!(table.well("A").map(<[_]>::len), Some(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn sentinel_inverted_row_is_skipped_alone() {
        let text = "ID;From;To;Finds\nA;;4;0\nA;4;6;1\nA;6;;0\n";
        let table = read(text).unwrap();
        assert!(table.rejection("A").is_none());
        assert_eq!(table.dropped_lines(), &[2]);
        let a = table.well("A").unwrap();
        let bounds: Vec<(f64, f64)> = a
            .iter()
            .map(|s| (s.from().value(), s.to().value()))
            .collect();
        assert_eq!(bounds, vec![(4.0, 6.0), (6.0, 1100.0)]);
    }

    #[test]
    fn field_count_mismatch_names_the_line() {
        let err = read("ID;From;To;Finds\nA;0;1;0\nA;1;2\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::FieldCount { line: 3, expected: 4, found: 3 }
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(read(""), Err(TableError::Empty)));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let table = read("\u{feff}ID;From;To;Finds\nA;0;1;0\n").unwrap();
        assert_eq!(table.len(), 1);
    }
}
