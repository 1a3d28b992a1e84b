//! # tidytable
//!
//! A library for reshaping tabular data between "messy" and "tidy" layouts,
//! following the tidy-data convention: each variable a column, each
//! observation a row, each value a cell. Intended for data preparation ahead
//! of analysis or visualization.
//!
//! ## Features
//!
//! - **Column-oriented tables**: insertion-ordered named string columns with
//!   ragged-input tolerance (short rows pad with empty cells)
//! - **Ingestion**: delimited text (CSV or custom delimiter, quoting
//!   honored), string grids as long-format `(row, col, value)` records, and
//!   JSON leaf extraction along a key path
//! - **Reshaping**: gather (melt), spread (pivot), bisect, disaggregate,
//!   transpose and normalize, all as pure table-to-table transformations
//! - **Relational operations**: left/right/inner/outer joins and set
//!   differences over opaque string keys, hash-based lookups throughout
//! - **Typed extraction**: numeric, boolean and string column views with
//!   documented lossy defaults, plus strict variants
//! - **Serialization**: delimited text output that round-trips, and a plain
//!   textual grid summary with a configurable row cap
//!
//! Tables are values: every operation borrows its input and returns a new
//! table, so pipelines compose freely and nothing is mutated in place.
//!
//! ```
//! use tidytable::Table;
//!
//! let table = Table::from_csv("name,maths,english\nJo,7,9\nFlo,8,")
//!     .gather("subject", "grade", &[("maths", "maths"), ("english", "english")]);
//! assert_eq!(table.column_names(), vec!["name", "subject", "grade"]);
//! assert_eq!(table.row_count(), 3); // Flo's missing english grade is dropped
//! ```

mod error;
mod helpers;
mod ingest;
mod relation;
mod reshape;
mod table;

pub use crate::error::TidyError;
pub use crate::helpers::split::{head_tail, split_at};
pub use crate::ingest::delimited::parse as parse_delimited;
pub use crate::relation::{inner_join, left_diff, left_join, outer_join, right_diff, right_join};
pub use crate::table::column::Column;
pub use crate::table::Table;
