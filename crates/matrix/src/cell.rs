use serde::{Deserialize, Serialize};
use std::fmt;

/// A single matrix cell: a finite number, or an explicit missing marker.
///
/// Missing is distinct from zero. Numeric strings that fail to parse degrade
/// to `Missing` rather than erroring, because malformed cells are common in
/// real exports.
/// Serializes as `Option<f64>`, so missing cells become JSON `null`, the
/// shape heatmap renderers expect for gaps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Option<f64>", from = "Option<f64>")]
pub enum Cell {
    #[default]
    Missing,
    Number(f64),
}

impl Cell {
    /// Parse a raw field into a cell.
    ///
    /// Thousands-separator commas are stripped before the numeric parse
    /// (`"1,000"` is 1000). Anything that does not parse to a finite float
    /// (empty, text, inf/nan) is `Missing`, never an error.
    #[must_use]
    pub fn parse(field: &str) -> Cell {
        let cleaned = field.trim().replace(',', "");
        if cleaned.is_empty() {
            return Cell::Missing;
        }
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Missing,
        }
    }

    /// True when no numeric value was parsed for this cell.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// The numeric value, if present.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Missing => None,
            Cell::Number(v) => Some(*v),
        }
    }

    /// Format to a fixed number of decimal places; missing renders empty.
    #[must_use]
    pub fn to_precision(&self, precision: u8) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(v) => format!("{v:.prec$}", prec = usize::from(precision)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Cell::Number(v)
        } else {
            Cell::Missing
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(opt: Option<f64>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Missing,
        }
    }
}

impl From<Cell> for Option<f64> {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}
