//! Flattening records and points back into table rows.

use crate::config::ColumnNames;
use crate::sample::{Attributes, GeneratedPoint, SampleInterval};
use crate::units::format_metres;

/// All columns of a record: its attribute bag plus the core fields.
pub fn record_row(record: &SampleInterval, names: &ColumnNames) -> Attributes {
    with_core_fields(record.attributes().clone(), record, names)
}

/// A generated point as a row: its source record plus offset and elevation.
pub fn point_row(
    point: &GeneratedPoint,
    names: &ColumnNames,
    offset_column: &str,
    elevation_column: &str,
) -> Attributes {
    let bag = point.attributes(offset_column, elevation_column);
    with_core_fields(bag, point.source(), names)
}

fn with_core_fields(bag: Attributes, record: &SampleInterval, names: &ColumnNames) -> Attributes {
    let mut row = bag
        .with(names.well.as_str(), record.well())
        .with(names.from.as_str(), format_metres(record.from().value()))
        .with(names.to.as_str(), format_metres(record.to().value()))
        .with(names.finds.as_str(), format_metres(record.finds()));
    if let Some(code) = record.code() {
        row.insert(names.code.as_str(), code);
    }
    row
}

/// `header` followed by every extra column it does not already contain.
pub fn output_columns(header: &[String], extra: &[&str]) -> Vec<String> {
    let mut columns = header.to_vec();
    for column in extra {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    columns
}
