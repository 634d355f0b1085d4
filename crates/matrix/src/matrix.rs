use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// A rectangular numeric matrix (row-major storage).
///
/// Every row has the same length; the parser enforces this before a matrix
/// is ever constructed, and [`Matrix::from_rows`] debug-asserts it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix {
    rows: Vec<Vec<Cell>>,
}

impl Matrix {
    /// Create an empty matrix (zero rows, zero columns).
    #[must_use]
    pub fn new() -> Self {
        Matrix { rows: Vec::new() }
    }

    /// Create a matrix from pre-validated rectangular rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(
            rows.windows(2).all(|w| w[0].len() == w[1].len()),
            "matrix rows must be the same length"
        );
        Matrix { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty matrix).
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True when there is no data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col), if in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Borrow the raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Return the transpose: cell (r, c) moves to (c, r).
    #[must_use]
    pub fn transposed(&self) -> Matrix {
        let rows = self.row_count();
        let cols = self.col_count();

        let mut transposed = Vec::with_capacity(cols);
        for c in 0..cols {
            let mut new_row = Vec::with_capacity(rows);
            for r in 0..rows {
                new_row.push(self.rows[r][c]);
            }
            transposed.push(new_row);
        }

        Matrix { rows: transposed }
    }
}
