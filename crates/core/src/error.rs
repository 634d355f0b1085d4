//! Error types for heatsheet.

use thiserror::Error;

/// Result type for heatsheet operations.
pub type HeatResult<T> = Result<T, HeatError>;

/// Broad class of an error, used by frontends to decide how to surface it.
///
/// Validation errors are malformed input the user can fix; state errors are
/// violated preconditions on the current view-state (recoverable no-ops);
/// io errors are environment failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    State,
    Io,
}

/// Errors that can occur while parsing input or mutating the view-state.
#[derive(Debug, Error)]
pub enum HeatError {
    /// Fewer than two non-blank lines in the input.
    #[error("file must have at least 2 rows (header and one data row), found {rows}")]
    InsufficientRows { rows: usize },

    /// A data row carries more cells than the header has column labels.
    /// `line` is the 1-based line number in the input file.
    #[error("line {line} has {cells} cells but the header names {cols} columns")]
    RowTooWide {
        line: usize,
        cells: usize,
        cols: usize,
    },

    /// Annotation target row is out of bounds.
    #[error("row index out of bounds: {index} (matrix has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    /// Annotation target column is out of bounds.
    #[error("column index out of bounds: {index} (matrix has {count} columns)")]
    ColIndexOutOfBounds { index: usize, count: usize },

    /// Annotation text is empty or whitespace-only.
    #[error("annotation text must not be empty")]
    EmptyAnnotationText,

    /// Annotation import payload was valid JSON but not an array.
    #[error("annotation import must be a JSON array, got {got}")]
    NotAList { got: String },

    /// An annotation item could not be read as an object.
    #[error("annotation {index} is not an object")]
    MalformedAnnotation { index: usize },

    /// A display option value is outside its domain.
    #[error("invalid value for {key}: '{value}' (expected {expected})")]
    InvalidOption {
        key: String,
        value: String,
        expected: String,
    },

    /// Transpose (or any matrix-shaped operation) with no data loaded.
    #[error("no matrix loaded")]
    EmptyMatrix,

    /// CSV-level read error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeatError {
    /// Classify this error for user-facing handling.
    ///
    /// Parse failures clear the previous render; annotation and option
    /// failures leave it intact; state errors are surfaced no-ops.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeatError::InsufficientRows { .. }
            | HeatError::RowTooWide { .. }
            | HeatError::RowIndexOutOfBounds { .. }
            | HeatError::ColIndexOutOfBounds { .. }
            | HeatError::EmptyAnnotationText
            | HeatError::NotAList { .. }
            | HeatError::MalformedAnnotation { .. }
            | HeatError::InvalidOption { .. }
            | HeatError::Csv(_)
            | HeatError::Json(_) => ErrorKind::Validation,
            HeatError::EmptyMatrix => ErrorKind::State,
            HeatError::Io(_) => ErrorKind::Io,
        }
    }

    /// Create an invalid-option error.
    pub fn invalid_option(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}
