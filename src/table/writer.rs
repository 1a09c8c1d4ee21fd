//! Writing rows in the semicolon format the modelling package imports.

use std::io::Write;

use crate::sample::Attributes;

use super::TableError;

/// Value written for a column a row has no attribute for.
pub const MISSING_VALUE: &str = "0";

/// Streams a header and then rows, all in one fixed column order.
pub struct TableWriter<W: Write> {
    out: W,
    columns: Vec<String>,
    rows: usize,
}

impl<W: Write> TableWriter<W> {
    /// Writes the header line and returns a writer for the rows.
    pub fn new(mut out: W, columns: Vec<String>) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::EmptyHeader);
        }
        let header: Vec<String> = columns.iter().map(|c| sanitize_header(c)).collect();
        writeln!(out, "{}", header.join(";"))?;
        Ok(Self {
            out,
            columns,
            rows: 0,
        })
    }

    /// Column names as given, before header sanitizing.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Writes one row; attributes outside the header are ignored.
    pub fn write_row(&mut self, row: &Attributes) -> Result<(), TableError> {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|column| match row.get(column) {
                Some(value) => sanitize_value(value),
                None => MISSING_VALUE.to_string(),
            })
            .collect();
        writeln!(self.out, "{}", cells.join(";"))?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<usize, TableError>
    where
        I: IntoIterator<Item = &'a Attributes>,
    {
        let before = self.rows;
        for row in rows {
            self.write_row(row)?;
        }
        Ok(self.rows - before)
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, TableError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Header name as the importer expects it.
///
/// ```
/// use boregeo::table::sanitize_header;
///
/// assert_eq!(sanitize_header("X"), "east");
/// assert_eq!(sanitize_header("Sample type;B"), "Sample_type_B");
/// ```
pub fn sanitize_header(name: &str) -> String {
    match name {
        "X" => "east".to_string(),
        "Y" => "north".to_string(),
        other => other.replace([' ', ';'], "_"),
    }
}

/// Cell value with delimiters and line breaks neutralized.
pub fn sanitize_value(value: &str) -> String {
    value.replace(';', ", ").replace("\r\n", "_").replace('\n', "_")
}
