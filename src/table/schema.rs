//! Header-driven column positions.

use crate::config::ColumnNames;

use super::TableError;

/// Positions of the columns the algorithms read, resolved once per file.
///
/// The code and elevation columns are optional: only the unifier needs a
/// code and wells without an elevation fall back to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    well: usize,
    from: usize,
    to: usize,
    finds: usize,
    code: Option<usize>,
    elevation: Option<usize>,
}

impl Schema {
    /// Maps `names` onto the header cells.
    ///
    /// ```
    /// use boregeo::config::ColumnNames;
    /// use boregeo::table::Schema;
    ///
    /// let header = ["ID", "East", "From", "To", "Finds"].map(String::from);
    /// let schema = Schema::resolve(&header, &ColumnNames::default()).unwrap();
    /// assert_eq!(schema.from(), 2);
    /// assert_eq!(schema.code(), None);
    /// ```
    pub fn resolve(header: &[String], names: &ColumnNames) -> Result<Self, TableError> {
        if header.is_empty() {
            return Err(TableError::EmptyHeader);
        }
        let position = |name: &str| header.iter().position(|cell| cell == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            columns: header.to_vec(),
            well: required(names.well.as_str())?,
            from: required(names.from.as_str())?,
            to: required(names.to.as_str())?,
            finds: required(names.finds.as_str())?,
            code: position(names.code.as_str()),
            elevation: position(names.elevation.as_str()),
        })
    }

    /// Header cells in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn well(&self) -> usize {
        self.well
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn finds(&self) -> usize {
        self.finds
    }

    pub fn code(&self) -> Option<usize> {
        self.code
    }

    pub fn elevation(&self) -> Option<usize> {
        self.elevation
    }

    /// Position of the code column, or an error naming the missing header.
    pub fn require_code(&self, names: &ColumnNames) -> Result<usize, TableError> {
        self.code
            .ok_or_else(|| TableError::MissingColumn(names.code.clone()))
    }

    /// True for columns stored on the record itself rather than in its
    /// attribute bag.
    pub(crate) fn is_core(&self, index: usize) -> bool {
        index == self.well
            || index == self.from
            || index == self.to
            || index == self.finds
            || Some(index) == self.code
    }
}
