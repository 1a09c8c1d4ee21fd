//! Cell-level number parsing.

use tracing::warn;

/// Cell text used by the sampling database for "no data".
pub const NO_DATA: &str = "Нет данных";

/// Numeric placeholders the sampling database writes instead of a value.
pub const NO_VALUE_MARKERS: [f64; 3] = [-999999.0, -999.75, -995.75];

/// Parses a numeric cell, accepting `,` as the decimal separator.
///
/// Empty cells, the no-data text, placeholder markers and non-finite
/// numbers are all treated as missing.
///
/// ```
/// use boregeo::table::parse_number;
///
/// assert_eq!(parse_number(" 12,5 "), Some(12.5));
/// assert_eq!(parse_number("-999.75"), None);
/// assert_eq!(parse_number("n/a"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let cell = raw.trim();
    if cell.is_empty() || cell == NO_DATA {
        return None;
    }
    let value: f64 = cell.replace(',', ".").parse().ok()?;
    if !value.is_finite() || NO_VALUE_MARKERS.contains(&value) {
        return None;
    }
    Some(value)
}

/// [`parse_number`] with a logged fallback for missing values.
pub(crate) fn number_or_sentinel(raw: &str, sentinel: f64, line: usize, column: &str) -> f64 {
    match parse_number(raw) {
        Some(value) => value,
        None => {
            warn!(
                line,
                column = %column,
                raw = %raw.trim(),
                sentinel,
                "Missing or unreadable number, using sentinel"
            );
            sentinel
        }
    }
}
