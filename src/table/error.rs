use thiserror::Error;

use crate::error::IntervalError;

/// Errors raised while reading or writing semicolon-delimited tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table has no header row")]
    Empty,

    #[error("Header lists no columns")]
    EmptyHeader,

    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(String),

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: {source}")]
    InvalidInterval {
        line: usize,
        #[source]
        source: IntervalError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
