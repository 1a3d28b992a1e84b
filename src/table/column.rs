use crate::error::TidyError;
use crate::table::Table;

/// Represents a named column with its cell values.
/// Cells are plain strings; typed views are produced on extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name (heading)
    pub(crate) name: String,
    /// Cell values in row order
    pub(crate) cells: Vec<String>,
}

impl Column {
    /// Creates a column from a name and its cell values.
    pub(crate) fn new(name: &str, cells: Vec<String>) -> Self {
        Self {
            name: name.to_owned(),
            cells,
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cell values in row order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Converts a cell value to a number, defaulting to `0.0` for cells that do
/// not parse. This is the canned lossy conversion; strict parsing goes
/// through [`Table::try_num_column`] or a custom converter.
pub(crate) fn to_number(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(0.0)
}

/// Converts a cell value to a boolean. Recognizes `true`, `yes` and `1`
/// case-insensitively; everything else is `false`. Deliberately lossy and
/// not round-trippable: `false` may mean "false", "no", empty or garbage.
pub(crate) fn to_boolean(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1"
    )
}

/// Typed column extraction.
impl Table {
    /// Extracts a column's cells, converting each with the supplied function.
    /// A missing column yields an empty vector.
    pub fn to_column<T>(&self, name: &str, convert: impl Fn(&str) -> T) -> Vec<T> {
        match self.column(name) {
            Some(column) => column.cells.iter().map(|cell| convert(cell)).collect(),
            None => Vec::new(),
        }
    }

    /// Extracts a column as numbers. Cells that fail to parse convert to
    /// `0.0`, as do all cells of a missing column (the column is then empty).
    pub fn num_column(&self, name: &str) -> Vec<f64> {
        self.to_column(name, to_number)
    }

    /// Extracts a column as numbers, failing on the first unparsable cell.
    pub fn try_num_column(&self, name: &str) -> Result<Vec<f64>, TidyError> {
        match self.column(name) {
            Some(column) => column
                .cells
                .iter()
                .map(|cell| Ok(cell.trim().parse::<f64>()?))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Extracts a column as owned strings.
    pub fn str_column(&self, name: &str) -> Vec<String> {
        self.to_column(name, str::to_owned)
    }

    /// Extracts a column as booleans via [`to_boolean`]'s lossy mapping.
    pub fn bool_column(&self, name: &str) -> Vec<bool> {
        self.to_column(name, to_boolean)
    }
}
