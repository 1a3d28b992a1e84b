//! The column-store table data model.
//! Columns are kept in insertion order; all cells are strings.

pub mod column;
pub mod display;

use crate::error::TidyError;
use crate::table::column::Column;
use glob::Pattern;
use std::collections::HashMap;

/// An ordered collection of named string columns.
///
/// Column order is insertion order, which governs CSV header order, summary
/// display and transpose orientation. Names are unique: inserting a column
/// under an existing name replaces its cells in place, keeping its position.
/// All columns of a non-empty table have equal length; operations that would
/// leave columns uneven pad the short ones with empty-string cells.
///
/// A `Table` is a value: every operation borrows its input and returns a
/// fresh table, so pipelines can be chained and a source table can be
/// transformed multiple ways without interference.
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Columns in insertion order
    columns: Vec<Column>,
    /// Column name to position in `columns`
    index: HashMap<String, usize>,
}

impl PartialEq for Table {
    /// Tables compare by their columns (names, order and cells); the
    /// name index is derived data.
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Table {
    /// Creates a table with zero columns and zero rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, cells)` entries, applying the usual
    /// replace-in-place rule for duplicate names and padding to the longest
    /// column.
    pub(crate) fn from_entries(entries: Vec<Column>) -> Self {
        let mut table = Self::empty();
        for entry in entries {
            table.push_column(&entry.name, entry.cells);
        }
        table.pad_columns();
        table
    }

    /// Inserts or replaces a column without fitting it to the current row
    /// count. Callers restore the equal-length invariant afterwards via
    /// [`Self::pad_columns`].
    pub(crate) fn push_column(&mut self, name: &str, cells: Vec<String>) {
        match self.index.get(name) {
            Some(&position) => self.columns[position].cells = cells,
            None => {
                self.index.insert(name.to_owned(), self.columns.len());
                self.columns.push(Column::new(name, cells));
            }
        }
    }

    /// Pads every column with empty-string cells up to the longest column.
    pub(crate) fn pad_columns(&mut self) {
        let rows = self
            .columns
            .iter()
            .map(|column| column.cells.len())
            .max()
            .unwrap_or(0);
        for column in &mut self.columns {
            column.cells.resize(rows, String::new());
        }
    }

    /// Rebuilds the name index so positions form a dense `0..n-1` range.
    fn reindex(columns: Vec<Column>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(position, column)| (column.name.clone(), position))
            .collect();
        Self { columns, index }
    }

    /// Returns true if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the number of rows (the length of any column).
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|column| column.cells.len())
            .unwrap_or(0)
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&position| &self.columns[position])
    }

    /// Returns true if a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the cell at the given column and row, if both exist.
    pub fn cell(&self, name: &str, row: usize) -> Option<&str> {
        self.column(name)
            .and_then(|column| column.cells.get(row))
            .map(String::as_str)
    }

    /// Returns the columns in insertion order.
    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Reads row `row` as `(name, cell)` pairs in column order.
    pub(crate) fn named_row(&self, row: usize) -> Vec<(&str, &str)> {
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column.cells[row].as_str()))
            .collect()
    }

    /// Builds a new table containing the given rows of this table, in the
    /// order listed. Column names and order are preserved.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let cells = rows.iter().map(|&row| column.cells[row].clone()).collect();
                Column::new(&column.name, cells)
            })
            .collect();
        Self::reindex(columns)
    }

    /// Appends the rows of `other`, aligning columns by name. Columns of
    /// `self` missing from `other` pad with empty-string cells; columns only
    /// in `other` are ignored.
    pub(crate) fn concat_rows(&self, other: &Self) -> Self {
        let extra = other.row_count();
        let mut table = self.clone();
        for column in &mut table.columns {
            match other.column(&column.name) {
                Some(source) => column.cells.extend(source.cells.iter().cloned()),
                None => column
                    .cells
                    .extend(std::iter::repeat(String::new()).take(extra)),
            }
        }
        table
    }

    /// Appends one row. Columns not named in `cells` get an empty-string
    /// cell; names not matching an existing column are ignored. On an empty
    /// table the given names establish the column set, in the order supplied.
    pub fn insert_row(&self, cells: &[(&str, &str)]) -> Self {
        if self.is_empty() {
            let columns = cells
                .iter()
                .map(|(name, value)| Column::new(name, vec![(*value).to_owned()]))
                .collect();
            return Self::from_entries(columns);
        }
        let mut table = self.clone();
        for column in &mut table.columns {
            let value = cells
                .iter()
                .find(|(name, _)| *name == column.name)
                .map(|(_, value)| (*value).to_owned())
                .unwrap_or_default();
            column.cells.push(value);
        }
        table
    }

    /// Adds or replaces a column. The values are padded with empty strings
    /// or truncated to the current row count; on an empty table the values'
    /// own length becomes the row count.
    pub fn insert_column<S: AsRef<str>>(&self, name: &str, values: &[S]) -> Self {
        let mut cells: Vec<String> = values.iter().map(|value| value.as_ref().to_owned()).collect();
        let mut table = self.clone();
        if !table.is_empty() {
            cells.resize(table.row_count(), String::new());
        }
        table.push_column(name, cells);
        table
    }

    /// Drops a column if present; identity if absent. Remaining column
    /// positions compact to a dense range.
    pub fn remove_column(&self, name: &str) -> Self {
        if !self.has_column(name) {
            return self.clone();
        }
        let columns = self
            .columns
            .iter()
            .filter(|column| column.name != name)
            .cloned()
            .collect();
        Self::reindex(columns)
    }

    /// Renames a column in place, preserving its position. Identity if `old`
    /// is absent. If `new` names another existing column, that column is
    /// superseded: the renamed column keeps its own cells and position and
    /// the previous holder of the name is removed.
    pub fn rename_column(&self, old: &str, new: &str) -> Self {
        if !self.has_column(old) || old == new {
            return self.clone();
        }
        let columns = self
            .columns
            .iter()
            .filter(|column| column.name != new)
            .map(|column| {
                if column.name == old {
                    Column::new(new, column.cells.clone())
                } else {
                    column.clone()
                }
            })
            .collect();
        Self::reindex(columns)
    }

    /// Replaces a column's cells with `apply` mapped over each cell.
    /// Identity if the column is absent.
    pub fn map_column(&self, name: &str, apply: impl Fn(&str) -> String) -> Self {
        let mut table = self.clone();
        if let Some(&position) = table.index.get(name) {
            let column = &mut table.columns[position];
            column.cells = column.cells.iter().map(|cell| apply(cell)).collect();
        }
        table
    }

    /// Keeps the rows whose cell in column `name` satisfies the predicate.
    /// A missing column keeps no rows at all; the column schema survives
    /// with zero rows.
    pub fn filter_rows(&self, name: &str, keep: impl Fn(&str) -> bool) -> Self {
        let rows: Vec<usize> = match self.column(name) {
            Some(column) => column
                .cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| keep(cell))
                .map(|(row, _)| row)
                .collect(),
            None => Vec::new(),
        };
        self.select_rows(&rows)
    }

    /// Keeps the columns whose name satisfies the predicate; positions
    /// compact afterwards.
    pub fn filter_columns(&self, keep: impl Fn(&str) -> bool) -> Self {
        let columns = self
            .columns
            .iter()
            .filter(|column| keep(&column.name))
            .cloned()
            .collect();
        Self::reindex(columns)
    }

    /// Keeps the columns whose name matches any of the glob patterns.
    pub fn filter_columns_matching(&self, patterns: &[&str]) -> Result<Self, TidyError> {
        let patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.filter_columns(|name| patterns.iter().any(|pattern| pattern.matches(name))))
    }
}
