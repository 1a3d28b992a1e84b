use crate::table::Table;
use serde_json::Value;

impl Table {
    /// Walks a JSON document along `path` (object-key lookups, transparently
    /// flattening any arrays encountered) and collects the string/number
    /// leaves stored under the key `name` in the objects reached, in
    /// encounter order. The collected values are inserted as a column named
    /// `name` under the usual [`Table::insert_column`] fitting rules.
    ///
    /// Malformed JSON, a path that matches nothing, and a path that reaches
    /// no leaves are all no-ops: the table is returned unchanged.
    pub fn insert_column_from_json(&self, name: &str, path: &[&str], json: &str) -> Self {
        let root: Value = match serde_json::from_str(json) {
            Ok(root) => root,
            Err(_) => return self.clone(),
        };
        let mut cells = Vec::new();
        collect(&root, path, name, &mut cells);
        if cells.is_empty() {
            return self.clone();
        }
        self.insert_column(name, &cells)
    }
}

/// Descends through objects along `path`, flattening arrays, and gathers
/// the leaves stored under `name` once the path is exhausted.
fn collect(value: &Value, path: &[&str], name: &str, cells: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, path, name, cells);
            }
        }
        Value::Object(fields) => match path.split_first() {
            Some((key, rest)) => {
                if let Some(child) = fields.get(*key) {
                    collect(child, rest, name, cells);
                }
            }
            None => {
                if let Some(leaf) = fields.get(name) {
                    push_leaves(leaf, cells);
                }
            }
        },
        _ => (),
    }
}

/// Pushes string and number leaves; arrays of leaves flatten. Booleans,
/// nulls and nested objects are not leaf values here.
fn push_leaves(value: &Value, cells: &mut Vec<String>) {
    match value {
        Value::String(text) => cells.push(text.clone()),
        Value::Number(number) => cells.push(number.to_string()),
        Value::Array(items) => {
            for item in items {
                push_leaves(item, cells);
            }
        }
        _ => (),
    }
}
