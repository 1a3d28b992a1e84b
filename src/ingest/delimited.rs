use crate::error::TidyError;
use crate::table::Table;
use csv::{ReaderBuilder, Trim, WriterBuilder};

/// Tokenizes delimited text into rows of string fields.
///
/// The dialect: fields split on the given single-character ASCII delimiter,
/// optionally double-quoted (permitting embedded delimiters and newlines,
/// with `""` as an escaped quote), whitespace trimmed, blank lines skipped.
/// A line holding only whitespace counts as blank, but a multi-field row of
/// empty cells (such as `","`) is data and is kept. Rows may be ragged; no
/// padding happens at this level. Unreadable records are dropped rather than
/// failing the whole input.
///
/// # Panics
///
/// Panics if `delimiter` is not an ASCII character; that is a programming
/// error, not malformed input.
pub fn parse(delimiter: char, text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(ascii_delimiter(delimiter))
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    reader
        .records()
        .filter_map(Result::ok)
        .map(|record| record.iter().map(str::to_owned).collect::<Vec<String>>())
        .filter(|row| !(row.len() == 1 && row[0].is_empty()))
        .collect()
}

/// Narrows a delimiter character to its byte, rejecting non-ASCII input that
/// would otherwise truncate into an unrelated byte.
fn ascii_delimiter(delimiter: char) -> u8 {
    assert!(
        delimiter.is_ascii(),
        "delimiter '{delimiter}' must be ASCII"
    );
    delimiter as u8
}

impl Table {
    /// Builds a table from delimited text. The first row supplies the column
    /// names, in order; subsequent rows are data. The header defines the
    /// column count: short rows pad with empty-string cells and overflow
    /// cells in long rows are dropped. Input with no rows at all yields
    /// [`Table::empty`].
    pub fn from_delimited(delimiter: char, text: &str) -> Self {
        let mut rows = parse(delimiter, text).into_iter();
        let headers = match rows.next() {
            Some(headers) => headers,
            None => return Self::empty(),
        };
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for row in rows {
            for (position, column) in cells.iter_mut().enumerate() {
                column.push(row.get(position).cloned().unwrap_or_default());
            }
        }
        let mut table = Self::empty();
        for (name, cells) in headers.iter().zip(cells) {
            table.push_column(name, cells);
        }
        table.pad_columns();
        table
    }

    /// Builds a table from comma-separated text.
    pub fn from_csv(text: &str) -> Self {
        Self::from_delimited(',', text)
    }

    /// Serializes the header row and all data rows, one line each, using the
    /// given ASCII delimiter. Fields containing the delimiter, quotes or
    /// newlines are double-quoted, so [`Table::from_delimited`] reads the
    /// output back.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is not an ASCII character.
    pub fn to_delimited(&self, delimiter: char) -> Result<String, TidyError> {
        if self.is_empty() {
            return Ok(String::new());
        }
        let mut writer = WriterBuilder::new()
            .delimiter(ascii_delimiter(delimiter))
            .from_writer(Vec::new());
        writer.write_record(self.column_names())?;
        for row in 0..self.row_count() {
            writer.write_record(self.columns().iter().map(|column| column.cells()[row].as_str()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|error| TidyError::IoError(error.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Serializes to comma-separated text.
    pub fn to_csv(&self) -> Result<String, TidyError> {
        self.to_delimited(',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_honors_quoting_and_trimming() {
        let rows = parse(',', "a ,\"b, c\", d\n\"say \"\"hi\"\"\"");
        assert_eq!(rows[0], vec!["a", "b, c", "d"]);
        assert_eq!(rows[1], vec!["say \"hi\""]);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let rows = parse(',', "a,b\n\n\n1,2\n");
        assert_eq!(rows.len(), 2);
        let rows = parse(',', "a\n   \n1");
        assert_eq!(rows, vec![vec!["a"], vec!["1"]]);
    }

    #[test]
    fn parse_keeps_multi_field_rows_of_empty_cells() {
        let rows = parse(',', "a,b\n,\n1,2");
        assert_eq!(rows[1], vec!["", ""]);
    }

    #[test]
    #[should_panic(expected = "must be ASCII")]
    fn parse_rejects_non_ascii_delimiter() {
        parse('§', "a§b");
    }

    #[test]
    fn from_csv_reads_headers_and_data() {
        let table = Table::from_csv("name,age\nGerald,42\nJo,7");
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(table.str_column("age"), vec!["42", "7"]);
    }

    #[test]
    fn from_csv_pads_ragged_rows_to_header_width() {
        let table = Table::from_csv("a,b,c\n1,2\n1\n1,2,3,4");
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.str_column("a"), vec!["1", "1", "1"]);
        assert_eq!(table.str_column("b"), vec!["2", "", "2"]);
        assert_eq!(table.str_column("c"), vec!["", "", "3"]);
    }

    #[test]
    fn from_delimited_custom_delimiter() {
        let table = Table::from_delimited(';', "a;b\n1;2");
        assert_eq!(table.cell("b", 0), Some("2"));
    }

    #[test]
    fn from_empty_text_is_empty() {
        assert_eq!(Table::from_csv(""), Table::empty());
        assert_eq!(Table::from_csv("\n\n"), Table::empty());
    }

    #[test]
    fn to_csv_round_trips() {
        let table = Table::from_csv("a,b\n1,x\n2,y");
        let text = table.to_csv().unwrap();
        assert_eq!(Table::from_csv(&text), table);
    }

    #[test]
    fn round_trips_with_all_empty_row() {
        let table = Table::from_csv("a,b\n1,x").insert_row(&[]);
        let text = table.to_csv().unwrap();
        assert_eq!(text, "a,b\n1,x\n,\n");
        assert_eq!(Table::from_csv(&text), table);
    }

    #[test]
    fn to_csv_quotes_embedded_delimiters() {
        let table = Table::empty().insert_column("a", &["1,5"]);
        let text = table.to_csv().unwrap();
        assert_eq!(text, "a\n\"1,5\"\n");
        assert_eq!(Table::from_csv(&text), table);
    }

    #[test]
    fn to_csv_of_empty_table_is_empty_text() {
        assert_eq!(Table::empty().to_csv().unwrap(), "");
    }
}
