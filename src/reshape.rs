//! The reshaping engine: operations that change a table's shape while
//! preserving its information content.

use crate::table::column::Column;
use crate::table::Table;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl Table {
    /// Collapses the columns named in `mappings` into a key/value column
    /// pair. `mappings` is an ordered list of `(original column, reference
    /// value)` pairs: for every input row, one output row is emitted per
    /// mapping, with `key_col` holding the reference value and `value_col`
    /// the original cell. Output rows whose value cell is empty are dropped;
    /// this is how missing cross-tabulated combinations are excluded.
    /// Columns not named in any mapping pass through, replicated across the
    /// rows emitted for their input row.
    ///
    /// Returns [`Table::empty`] when none of the mapped columns exist, and
    /// also when no rows survive the empty-value filter.
    pub fn gather(&self, key_col: &str, value_col: &str, mappings: &[(&str, &str)]) -> Self {
        let live: Vec<(&str, &str)> = mappings
            .iter()
            .copied()
            .filter(|(original, _)| self.has_column(original))
            .collect();
        if live.is_empty() {
            return Self::empty();
        }
        let mapped: HashSet<&str> = mappings.iter().map(|(original, _)| *original).collect();
        let passthrough: Vec<&Column> = self
            .columns()
            .iter()
            .filter(|column| !mapped.contains(column.name()))
            .collect();

        let mut carried: Vec<Vec<String>> = vec![Vec::new(); passthrough.len()];
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for row in 0..self.row_count() {
            for (original, reference) in &live {
                let value = self.cell(original, row).unwrap_or_default();
                if value.is_empty() {
                    continue;
                }
                for (cells, column) in carried.iter_mut().zip(&passthrough) {
                    cells.push(column.cells()[row].clone());
                }
                keys.push((*reference).to_owned());
                values.push(value.to_owned());
            }
        }
        if keys.is_empty() {
            return Self::empty();
        }

        let mut entries: Vec<Column> = passthrough
            .iter()
            .zip(carried)
            .map(|(column, cells)| Column::new(column.name(), cells))
            .collect();
        entries.push(Column::new(key_col, keys));
        entries.push(Column::new(value_col, values));
        Self::from_entries(entries)
    }

    /// The structural inverse of [`Table::gather`]: rotates the distinct
    /// values of `key_col` into new columns populated from `value_col`,
    /// grouping rows by the composite identity of all remaining columns.
    /// Missing `(identity, key)` combinations yield empty-string cells;
    /// duplicate combinations resolve last-write-wins in row order. Identity
    /// if either column is absent.
    pub fn spread(&self, key_col: &str, value_col: &str) -> Self {
        if !self.has_column(key_col) || !self.has_column(value_col) {
            return self.clone();
        }
        let identity_columns: Vec<&Column> = self
            .columns()
            .iter()
            .filter(|column| column.name() != key_col && column.name() != value_col)
            .collect();

        // Distinct identities and key values, both in first-occurrence order,
        // plus an (identity, key) -> value map probed for the full Cartesian
        // product below.
        let mut identity_rows: Vec<usize> = Vec::new();
        let mut identity_index: HashMap<String, usize> = HashMap::new();
        let mut keys: Vec<String> = Vec::new();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut lookup: HashMap<(usize, String), String> = HashMap::new();
        for row in 0..self.row_count() {
            let identity = row_identity(&identity_columns, row);
            let position = *identity_index.entry(identity).or_insert_with(|| {
                identity_rows.push(row);
                identity_rows.len() - 1
            });
            let key = self.cell(key_col, row).unwrap_or_default().to_owned();
            if seen_keys.insert(key.clone()) {
                keys.push(key.clone());
            }
            let value = self.cell(value_col, row).unwrap_or_default().to_owned();
            lookup.insert((position, key), value);
        }
        debug!(
            identities = identity_rows.len(),
            keys = keys.len(),
            "spreading key/value pairs"
        );

        let mut entries: Vec<Column> = identity_columns
            .iter()
            .map(|column| {
                let cells = identity_rows
                    .iter()
                    .map(|&row| column.cells()[row].clone())
                    .collect();
                Column::new(column.name(), cells)
            })
            .collect();
        for key in keys {
            let cells = (0..identity_rows.len())
                .map(|position| {
                    lookup
                        .get(&(position, key.clone()))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            entries.push(Column::new(&key, cells));
        }
        Self::from_entries(entries)
    }

    /// Replaces one column with two, derived by applying `split` to each
    /// cell. The new columns take the replaced column's position. Identity
    /// if the column is absent.
    pub fn bisect(
        &self,
        name: &str,
        split: impl Fn(&str) -> (String, String),
        names: (&str, &str),
    ) -> Self {
        let column = match self.column(name) {
            Some(column) => column,
            None => return self.clone(),
        };
        let mut firsts = Vec::with_capacity(column.cells().len());
        let mut seconds = Vec::with_capacity(column.cells().len());
        for cell in column.cells() {
            let (first, second) = split(cell);
            firsts.push(first);
            seconds.push(second);
        }
        self.replace_column(
            name,
            vec![Column::new(names.0, firsts), Column::new(names.1, seconds)],
        )
    }

    /// Replaces one column with the capture groups of `pattern` applied to
    /// each cell, one new column per name in `new_names` taking the replaced
    /// column's position. Cells that do not match, and capture groups beyond
    /// what the pattern provides, yield empty-string cells; capture groups
    /// beyond `new_names` are ignored. Identity if the column is absent.
    pub fn disaggregate(&self, name: &str, pattern: &Regex, new_names: &[&str]) -> Self {
        let column = match self.column(name) {
            Some(column) => column,
            None => return self.clone(),
        };
        let mut groups: Vec<Vec<String>> = vec![Vec::new(); new_names.len()];
        for cell in column.cells() {
            let captures = pattern.captures(cell);
            for (position, cells) in groups.iter_mut().enumerate() {
                let value = captures
                    .as_ref()
                    .and_then(|captures| captures.get(position + 1))
                    .map(|group| group.as_str().to_owned())
                    .unwrap_or_default();
                cells.push(value);
            }
        }
        let replacements = new_names
            .iter()
            .zip(groups)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        self.replace_column(name, replacements)
    }

    /// Turns the values of `heading_col` into the new column names and the
    /// remaining column names into the values of a new first column named
    /// `row_name_col`. Duplicate heading values resolve last-write-wins.
    /// Returns [`Table::empty`] if `heading_col` is absent.
    pub fn transpose(&self, heading_col: &str, row_name_col: &str) -> Self {
        let headings = match self.column(heading_col) {
            Some(column) => column,
            None => return Self::empty(),
        };
        let others: Vec<&Column> = self
            .columns()
            .iter()
            .filter(|column| column.name() != heading_col)
            .collect();
        let names = others.iter().map(|column| column.name().to_owned()).collect();
        let mut entries = vec![Column::new(row_name_col, names)];
        for (row, heading) in headings.cells().iter().enumerate() {
            let cells = others
                .iter()
                .map(|column| column.cells()[row].clone())
                .collect();
            entries.push(Column::new(heading, cells));
        }
        Self::from_entries(entries)
    }

    /// Factors out redundant repeated rows: returns a key table with one row
    /// per distinct combination of `value_cols` (under a fresh surrogate key
    /// named `key_name`) and a value table holding the remaining columns
    /// plus the surrogate key per original row, so the original can be
    /// rebuilt by rejoining. Identical combinations share a key. With no
    /// matching value columns this is a no-op: `(empty, original)`.
    pub fn normalize(&self, key_name: &str, value_cols: &[&str]) -> (Self, Self) {
        let live: Vec<&Column> = value_cols
            .iter()
            .filter_map(|name| self.column(name))
            .collect();
        if live.is_empty() {
            return (Self::empty(), self.clone());
        }

        let mut combo_rows: Vec<usize> = Vec::new();
        let mut combo_index: HashMap<String, usize> = HashMap::new();
        let mut assignment: Vec<usize> = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let identity = row_identity(&live, row);
            let position = *combo_index.entry(identity).or_insert_with(|| {
                combo_rows.push(row);
                combo_rows.len() - 1
            });
            assignment.push(position);
        }

        let width = label_width(combo_rows.len());
        let surrogates = (0..combo_rows.len())
            .map(|index| index_label(index, width, ""))
            .collect();
        let mut key_entries = vec![Column::new(key_name, surrogates)];
        for column in &live {
            let cells = combo_rows
                .iter()
                .map(|&row| column.cells()[row].clone())
                .collect();
            key_entries.push(Column::new(column.name(), cells));
        }

        let value_names: HashSet<&str> = live.iter().map(|column| column.name()).collect();
        let mut value_entries: Vec<Column> = self
            .columns()
            .iter()
            .filter(|column| !value_names.contains(column.name()))
            .cloned()
            .collect();
        let references = assignment
            .iter()
            .map(|&position| index_label(position, width, ""))
            .collect();
        value_entries.push(Column::new(key_name, references));

        (Self::from_entries(key_entries), Self::from_entries(value_entries))
    }

    /// Adds a column of unique sequential identifiers, zero-left-padded to a
    /// common width and optionally prefixed. Useful preparation for joins
    /// and normalization when no natural key exists.
    pub fn insert_index_column(&self, name: &str, prefix: &str) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        let width = label_width(self.row_count());
        let labels: Vec<String> = (0..self.row_count())
            .map(|index| index_label(index, width, prefix))
            .collect();
        self.insert_column(name, &labels)
    }

    /// Rebuilds the table with the named column replaced by `replacements`
    /// at its position.
    fn replace_column(&self, name: &str, replacements: Vec<Column>) -> Self {
        let mut replacements = Some(replacements);
        let mut entries = Vec::new();
        for column in self.columns() {
            if column.name() == name {
                if let Some(columns) = replacements.take() {
                    entries.extend(columns);
                }
            } else {
                entries.push(column.clone());
            }
        }
        Self::from_entries(entries)
    }
}

/// Composite identity of a row over the given columns. Cells join on the
/// ASCII unit separator, which textual cell data is assumed not to contain.
fn row_identity(columns: &[&Column], row: usize) -> String {
    columns
        .iter()
        .map(|column| column.cells()[row].as_str())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

/// Width of the widest decimal index for `count` labels.
fn label_width(count: usize) -> usize {
    count.saturating_sub(1).to_string().len()
}

/// Formats one zero-left-padded index label.
fn index_label(index: usize, width: usize, prefix: &str) -> String {
    format!("{prefix}{index:0width$}")
}

#[cfg(test)]
mod tests {
    use crate::table::Table;
    use regex::Regex;

    fn treatments() -> Table {
        Table::from_csv("name,a,b\nJohn,,2\nJane,16,11\nMary,3,1")
    }

    #[test]
    fn gather_collapses_mapped_columns() {
        let table = treatments().gather("drug", "heartrate", &[("a", "a"), ("b", "b")]);
        assert_eq!(table.column_names(), vec!["name", "drug", "heartrate"]);
        // John's empty cell under "a" is dropped.
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.str_column("name"), vec!["John", "Jane", "Jane", "Mary", "Mary"]);
        assert_eq!(table.str_column("drug"), vec!["b", "a", "b", "a", "b"]);
        assert_eq!(table.str_column("heartrate"), vec!["2", "16", "11", "3", "1"]);
    }

    #[test]
    fn gather_with_no_matching_columns_is_empty() {
        assert_eq!(
            treatments().gather("k", "v", &[("x", "x"), ("y", "y")]),
            Table::empty()
        );
    }

    #[test]
    fn gather_with_all_values_empty_is_empty() {
        let table = Table::from_csv("name,a\nJohn,\nJane,");
        assert_eq!(table.gather("k", "v", &[("a", "a")]), Table::empty());
    }

    #[test]
    fn spread_is_inverse_of_gather() {
        let table = Table::from_csv("name,a,b\nJane,16,11\nMary,3,1");
        let gathered = table.gather("drug", "heartrate", &[("a", "a"), ("b", "b")]);
        assert_eq!(gathered.spread("drug", "heartrate"), table);
    }

    #[test]
    fn spread_fills_missing_combinations_with_empty() {
        let table = Table::from_csv("name,key,value\nJane,a,1\nMary,b,2");
        let spread = table.spread("key", "value");
        assert_eq!(spread.column_names(), vec!["name", "a", "b"]);
        assert_eq!(spread.str_column("a"), vec!["1", ""]);
        assert_eq!(spread.str_column("b"), vec!["", "2"]);
    }

    #[test]
    fn spread_duplicate_combination_takes_last_value() {
        let table = Table::from_csv("name,key,value\nJane,a,1\nJane,a,9");
        let spread = table.spread("key", "value");
        assert_eq!(spread.row_count(), 1);
        assert_eq!(spread.str_column("a"), vec!["9"]);
    }

    #[test]
    fn spread_missing_column_is_identity() {
        assert_eq!(treatments().spread("nope", "a"), treatments());
    }

    #[test]
    fn bisect_replaces_column_in_place() {
        let table = Table::from_csv("when,who\n2021-05,Jo")
            .bisect("when", |cell| crate::helpers::split::split_at(4, cell), ("year", "month"));
        assert_eq!(table.column_names(), vec!["year", "month", "who"]);
        assert_eq!(table.cell("year", 0), Some("2021"));
        assert_eq!(table.cell("month", 0), Some("-05"));
    }

    #[test]
    fn bisect_missing_column_is_identity() {
        assert_eq!(
            treatments().bisect("nope", |_| (String::new(), String::new()), ("x", "y")),
            treatments()
        );
    }

    #[test]
    fn disaggregate_populates_capture_groups() {
        let pattern = Regex::new(r"(\d+)-(\d+)").unwrap();
        let table = Table::from_csv("range,who\n3-7,Jo\nbad,Flo")
            .disaggregate("range", &pattern, &["low", "high"]);
        assert_eq!(table.column_names(), vec!["low", "high", "who"]);
        assert_eq!(table.str_column("low"), vec!["3", ""]);
        assert_eq!(table.str_column("high"), vec!["7", ""]);
    }

    #[test]
    fn disaggregate_group_count_mismatch_pads_and_truncates() {
        let pattern = Regex::new(r"(\d+)-(\d+)").unwrap();
        let padded = Table::from_csv("range\n3-7").disaggregate("range", &pattern, &["a", "b", "c"]);
        assert_eq!(padded.str_column("c"), vec![""]);
        let truncated = Table::from_csv("range\n3-7").disaggregate("range", &pattern, &["a"]);
        assert_eq!(truncated.column_names(), vec!["a"]);
        assert_eq!(truncated.str_column("a"), vec!["3"]);
    }

    #[test]
    fn transpose_rotates_headings() {
        let table = Table::from_csv("quarter,income,costs\nQ1,100,90\nQ2,120,80")
            .transpose("quarter", "metric");
        assert_eq!(table.column_names(), vec!["metric", "Q1", "Q2"]);
        assert_eq!(table.str_column("metric"), vec!["income", "costs"]);
        assert_eq!(table.str_column("Q1"), vec!["100", "90"]);
        assert_eq!(table.str_column("Q2"), vec!["120", "80"]);
    }

    #[test]
    fn transpose_duplicate_headings_last_write_wins() {
        let table = Table::from_csv("q,v\nQ1,1\nQ1,2").transpose("q", "metric");
        assert_eq!(table.column_names(), vec!["metric", "Q1"]);
        assert_eq!(table.str_column("Q1"), vec!["2"]);
    }

    #[test]
    fn transpose_missing_heading_column_is_empty() {
        assert_eq!(treatments().transpose("nope", "metric"), Table::empty());
    }

    #[test]
    fn normalize_shares_keys_between_identical_combinations() {
        let table = Table::from_csv(
            "owner,animal,name,age\n\
             Simone,cat,Tiddles,6\n\
             Marj,cat,Tiddles,6\n\
             Arthur,dog,Rex,3\n\
             Craig,fish,Bubbles,1",
        );
        let (keys, values) = table.normalize("id", &["animal", "name", "age"]);
        assert_eq!(keys.column_names(), vec!["id", "animal", "name", "age"]);
        assert_eq!(keys.row_count(), 3);
        assert_eq!(values.column_names(), vec!["owner", "id"]);
        // Simone and Marj share the (cat, Tiddles, 6) combination.
        assert_eq!(values.cell("id", 0), values.cell("id", 1));
        assert_ne!(values.cell("id", 0), values.cell("id", 2));
    }

    #[test]
    fn normalize_rejoin_round_trips() {
        let table = Table::from_csv(
            "owner,animal,name,age\n\
             Simone,cat,Tiddles,6\n\
             Marj,cat,Tiddles,6\n\
             Arthur,dog,Rex,3\n\
             Craig,fish,Bubbles,1",
        );
        let (keys, values) = table.normalize("id", &["animal", "name", "age"]);
        let rebuilt = crate::relation::right_join((&keys, "id"), (&values, "id")).remove_column("id");
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn normalize_without_value_columns_is_a_no_op() {
        let (keys, values) = treatments().normalize("id", &[]);
        assert_eq!(keys, Table::empty());
        assert_eq!(values, treatments());
        let (keys, values) = treatments().normalize("id", &["nope"]);
        assert_eq!(keys, Table::empty());
        assert_eq!(values, treatments());
    }

    #[test]
    fn insert_index_column_pads_to_common_width() {
        let rows: String = (0..11).map(|row| format!("{row}\n")).collect();
        let table = Table::from_csv(&format!("v\n{rows}")).insert_index_column("id", "r");
        assert_eq!(table.cell("id", 0), Some("r00"));
        assert_eq!(table.cell("id", 10), Some("r10"));
    }

    #[test]
    fn reshaping_the_empty_table_stays_empty() {
        let empty = Table::empty();
        assert_eq!(empty.gather("k", "v", &[("a", "a")]), Table::empty());
        assert_eq!(empty.spread("k", "v"), Table::empty());
        assert_eq!(empty.bisect("a", |_| (String::new(), String::new()), ("x", "y")), Table::empty());
        let pattern = Regex::new("(.)").unwrap();
        assert_eq!(empty.disaggregate("a", &pattern, &["x"]), Table::empty());
        assert_eq!(empty.transpose("a", "metric"), Table::empty());
        assert_eq!(empty.normalize("id", &["a"]), (Table::empty(), Table::empty()));
        assert_eq!(empty.insert_index_column("id", ""), Table::empty());
    }
}
