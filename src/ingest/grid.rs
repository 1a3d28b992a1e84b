use crate::ingest::delimited::parse;
use crate::table::Table;

/// Column names of the long-format grid table.
const GRID_HEADINGS: [&str; 3] = ["row", "col", "value"];

impl Table {
    /// Interprets comma-separated text as a matrix and converts it to a
    /// long-format table via [`Table::from_grid_rows`].
    pub fn from_grid(text: &str) -> Self {
        Self::from_grid_rows(&parse(',', text))
    }

    /// Converts a matrix of strings to a three-column `(row, col, value)`
    /// table with one record per cell, 0-indexed. Rows whose cells are all
    /// empty contribute no records but keep their index, so later rows are
    /// not renumbered; empty cells within a non-empty row are retained as
    /// records. Ragged input is fine: row `r` contributes records only for
    /// the columns present in that row. A matrix with no records at all
    /// yields [`Table::empty`].
    pub fn from_grid_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        let mut records: [Vec<String>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for (row, cells) in rows.iter().enumerate() {
            if cells.iter().all(|cell| cell.as_ref().is_empty()) {
                continue;
            }
            for (col, cell) in cells.iter().enumerate() {
                records[0].push(row.to_string());
                records[1].push(col.to_string());
                records[2].push(cell.as_ref().to_owned());
            }
        }
        if records[0].is_empty() {
            return Self::empty();
        }
        let mut table = Self::empty();
        for (name, cells) in GRID_HEADINGS.into_iter().zip(records) {
            table.push_column(name, cells);
        }
        table
    }
}
