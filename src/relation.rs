//! The relational engine: joins and set differences over a shared key.
//!
//! Every function takes `(table, key column name)` pairs; the two key
//! columns may share a name or differ. Keys are opaque strings matched by
//! equality, with no uniqueness requirement: lookup tables built over a side
//! follow that side's row order, so the last occurrence of a duplicate key
//! wins. Lookups are hash-based, never nested scans.

use crate::table::column::Column;
use crate::table::Table;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Joins every row of the left table with the matching right-table row,
/// retaining all left rows. Matching right rows contribute their columns
/// except the key and except names the left table already has (the left
/// side wins shared names); unmatched rows get empty-string cells there.
/// If several right rows share a key the last one in row order wins.
/// Identity on the left table if either key column is absent.
pub fn left_join(left: (&Table, &str), right: (&Table, &str)) -> Table {
    let ((table1, key1), (table2, key2)) = (left, right);
    let (keys1, keys2) = match (table1.column(key1), table2.column(key2)) {
        (Some(keys1), Some(keys2)) => (keys1, keys2),
        _ => return table1.clone(),
    };

    let mut matches: HashMap<&str, usize> = HashMap::new();
    for (row, key) in keys2.cells().iter().enumerate() {
        matches.insert(key, row);
    }
    debug!(
        keys = matches.len(),
        rows = table1.row_count(),
        "probing join lookup"
    );

    let mut entries: Vec<Column> = table1.columns().to_vec();
    for column in table2.columns() {
        if column.name() == key2 || table1.has_column(column.name()) {
            continue;
        }
        let cells = keys1
            .cells()
            .iter()
            .map(|key| {
                matches
                    .get(key.as_str())
                    .map(|&row| column.cells()[row].clone())
                    .unwrap_or_default()
            })
            .collect();
        entries.push(Column::new(column.name(), cells));
    }
    Table::from_entries(entries)
}

/// [`left_join`] with the table roles swapped.
pub fn right_join(left: (&Table, &str), right: (&Table, &str)) -> Table {
    left_join(right, left)
}

/// Joins the two tables on a shared key renamed to `new_key`, keeping only
/// the left rows whose key actually occurs in the right table. Returns
/// [`Table::empty`] if either original key column is missing.
pub fn inner_join(new_key: &str, left: (&Table, &str), right: (&Table, &str)) -> Table {
    let ((table1, key1), (table2, key2)) = (left, right);
    let keys2 = match (table1.has_column(key1), table2.column(key2)) {
        (true, Some(keys2)) => keys2,
        _ => return Table::empty(),
    };
    let present: HashSet<&str> = keys2.cells().iter().map(String::as_str).collect();
    let joined = left_join(
        (&table1.rename_column(key1, new_key), new_key),
        (&table2.rename_column(key2, new_key), new_key),
    );
    joined.filter_rows(new_key, |key| present.contains(key))
}

/// The union of the left- and right-joined rows: the left join, followed by
/// the right-table rows whose key never occurs in the left table (their
/// left-derived cells are empty strings). Both keys are renamed to
/// `new_key`. Returns [`Table::empty`] if either original key column is
/// missing.
pub fn outer_join(new_key: &str, left: (&Table, &str), right: (&Table, &str)) -> Table {
    let ((table1, key1), (table2, key2)) = (left, right);
    let keys1 = match (table1.column(key1), table2.has_column(key2)) {
        (Some(keys1), true) => keys1,
        _ => return Table::empty(),
    };
    let seen: HashSet<&str> = keys1.cells().iter().map(String::as_str).collect();

    let renamed1 = table1.rename_column(key1, new_key);
    let renamed2 = table2.rename_column(key2, new_key);
    let combined = left_join((&renamed1, new_key), (&renamed2, new_key));
    let reversed = left_join((&renamed2, new_key), (&renamed1, new_key));

    let unmatched: Vec<usize> = (0..reversed.row_count())
        .filter(|&row| {
            reversed
                .cell(new_key, row)
                .map(|key| !seen.contains(key))
                .unwrap_or(false)
        })
        .collect();
    combined.concat_rows(&reversed.select_rows(&unmatched))
}

/// The rows of the left table whose key value occurs nowhere in the right
/// table's key column. Returns [`Table::empty`] if the left key column is
/// absent; identity on the left table if the right key column is absent
/// (nothing can match, so nothing is excluded).
pub fn left_diff(left: (&Table, &str), right: (&Table, &str)) -> Table {
    let ((table1, key1), (table2, key2)) = (left, right);
    if !table1.has_column(key1) {
        return Table::empty();
    }
    let keys2 = match table2.column(key2) {
        Some(keys2) => keys2,
        None => return table1.clone(),
    };
    let excluded: HashSet<&str> = keys2.cells().iter().map(String::as_str).collect();
    table1.filter_rows(key1, |key| !excluded.contains(key))
}

/// [`left_diff`] with the table roles swapped.
pub fn right_diff(left: (&Table, &str), right: (&Table, &str)) -> Table {
    left_diff(right, left)
}
