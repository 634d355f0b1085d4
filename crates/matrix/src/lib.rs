//! Tabular parser for heatsheet
//!
//! Turns raw delimited text (CSV/TSV) into a rectangular numeric matrix
//! with row and column labels. Parsing is lenient where data is lenient:
//! malformed numeric cells degrade to a missing marker and short lines are
//! skipped, but the matrix handed downstream is always rectangular.
//!
//! # Examples
//!
//! ```
//! use heatsheet_matrix::{parse, Cell, Delimiter};
//!
//! let text = ",North,South\nQ1,1200,900\nQ2,1,450\n";
//! let table = parse(text, Delimiter::Comma).unwrap();
//!
//! assert_eq!(table.col_labels, vec!["North", "South"]);
//! assert_eq!(table.row_labels, vec!["Q1", "Q2"]);
//! assert_eq!(table.matrix.get(0, 0), Some(Cell::Number(1200.0)));
//! ```
//!
//! ## Delimiter inference
//!
//! ```
//! use heatsheet_matrix::Delimiter;
//!
//! // Extension wins over content; otherwise the first line is counted.
//! assert_eq!(Delimiter::infer("report.tsv", "a,b"), Delimiter::Tab);
//! assert_eq!(Delimiter::infer("data", "a\tb\tc"), Delimiter::Tab);
//! ```

mod cell;
mod dsv;
mod matrix;

/// Re-export the cell value type.
pub use cell::Cell;
/// Re-export the parser entry points and delimiter type.
pub use dsv::{parse, parse_file, Delimiter, ParsedTable};
/// Re-export the matrix type.
pub use matrix::Matrix;
