//! Semicolon-delimited sampling tables.
//!
//! Input tables have one header row naming the attributes and one row per
//! sample interval. Output tables use the same layout with the header
//! adjusted for the importer of the mine-modelling package.

mod error;
mod parse;
mod reader;
mod row;
mod schema;
mod writer;

pub use error::TableError;
pub use parse::{parse_number, NO_DATA, NO_VALUE_MARKERS};
pub use reader::{read_table, WellTable};
pub use row::{output_columns, point_row, record_row};
pub use schema::Schema;
pub use writer::{sanitize_header, sanitize_value, TableWriter, MISSING_VALUE};
