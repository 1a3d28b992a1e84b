use crate::table::Table;
use std::fmt::Display;

/// Number of data rows shown by the `Display` impl.
const DISPLAY_ROW_LIMIT: isize = 10;

impl Table {
    /// Renders a plain textual grid: a header row, a divider, up to
    /// `max_rows` data rows (all rows when `max_rows` is negative), a `...`
    /// continuation line when rows were cut off, and a trailing row/column
    /// count. Cells are padded so the `|` separators line up; the output is
    /// Markdown-pipe-table compatible but carries no markup semantics.
    pub fn summary(&self, max_rows: isize) -> String {
        let rows = self.row_count();
        let shown = if max_rows < 0 {
            rows
        } else {
            rows.min(max_rows as usize)
        };

        let widths: Vec<usize> = self
            .columns()
            .iter()
            .map(|column| {
                column.cells[..shown]
                    .iter()
                    .map(|cell| cell_width(cell))
                    .chain([cell_width(&column.name), 3])
                    .max()
                    .unwrap_or(3)
            })
            .collect();

        let mut lines = Vec::new();
        if !self.is_empty() {
            let names: Vec<&str> = self.column_names();
            lines.push(grid_line(&names, &widths));
            let dividers: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            lines.push(grid_line(&dividers, &widths));
            for row in 0..shown {
                let cells: Vec<&str> = self
                    .columns()
                    .iter()
                    .map(|column| column.cells[row].as_str())
                    .collect();
                lines.push(grid_line(&cells, &widths));
            }
            if shown < rows {
                lines.push("...".to_owned());
            }
        }
        lines.push(format!("{} rows, {} columns", rows, self.column_count()));
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Display width of a cell, counted in characters rather than bytes so that
/// multibyte cells line up; this matches how the formatter pads below.
fn cell_width(text: &str) -> usize {
    text.chars().count()
}

/// Formats one grid row, padding each cell to its column width.
fn grid_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {:<width$} |", cell.as_ref(), width = *width));
    }
    line
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary(DISPLAY_ROW_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use crate::table::Table;

    #[test]
    fn summary_renders_grid_and_count() {
        let table = Table::from_csv("name,age\nGerald,42\nJo,7");
        let expected = "\
| name   | age |
| ------ | --- |
| Gerald | 42  |
| Jo     | 7   |
2 rows, 2 columns
";
        assert_eq!(table.summary(-1), expected);
    }

    #[test]
    fn summary_truncates_with_continuation_marker() {
        let table = Table::from_csv("a\n1\n2\n3");
        let text = table.summary(1);
        assert!(text.contains("| 1   |"));
        assert!(!text.contains("| 2   |"));
        assert!(text.contains("\n...\n"));
        assert!(text.ends_with("3 rows, 1 columns\n"));
    }

    #[test]
    fn summary_aligns_multibyte_cells() {
        let table = Table::from_csv("name,age\nZoë,3\nRenée,41");
        let expected = "\
| name  | age |
| ----- | --- |
| Zoë   | 3   |
| Renée | 41  |
2 rows, 2 columns
";
        assert_eq!(table.summary(-1), expected);
    }

    #[test]
    fn summary_of_empty_table_is_count_only() {
        assert_eq!(Table::empty().summary(-1), "0 rows, 0 columns\n");
    }

    #[test]
    fn display_matches_summary() {
        let table = Table::from_csv("a\n1");
        assert_eq!(format!("{table}"), table.summary(10));
    }
}
