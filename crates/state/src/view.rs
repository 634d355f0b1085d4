use heatsheet_core::{HeatError, HeatResult};
use heatsheet_matrix::{Matrix, ParsedTable};

use crate::annotation::{self, Annotation};
use crate::options::{DisplayOptions, OptionChange};

/// The single source of truth for what is rendered.
///
/// One instance per session, owned by the frontend and passed by reference;
/// every mutation goes through the operations here (usually dispatched from
/// an [`Intent`](crate::Intent)), and each one validates before it mutates,
/// so a failed operation leaves the state exactly as it was.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    matrix: Matrix,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    annotations: Vec<Annotation>,
    options: DisplayOptions,
}

impl ViewState {
    /// Fresh state: empty matrix, default options. The startup state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    #[must_use]
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Replace the matrix and labels with freshly parsed data.
    ///
    /// Annotations are cleared and options reset to defaults; a caller-
    /// supplied title survives the reset.
    pub fn load(&mut self, table: ParsedTable, title_override: Option<String>) {
        self.matrix = table.matrix;
        self.row_labels = table.row_labels;
        self.col_labels = table.col_labels;
        self.annotations.clear();
        self.options = DisplayOptions::default();
        if let Some(title) = title_override {
            self.options.title = title;
        }
    }

    /// Change exactly one display option.
    pub fn set(&mut self, change: OptionChange) {
        self.options.apply(change);
    }

    /// Restore default options without touching matrix, labels, or
    /// annotations.
    pub fn reset_options(&mut self) {
        self.options = DisplayOptions::default();
    }

    /// Swap axes: row labels become column labels and the matrix flips.
    ///
    /// Annotations are deliberately not remapped; they stay attached to
    /// their original label strings even though those now name the other
    /// axis. Fails with a state error when no matrix is loaded.
    pub fn transpose(&mut self) -> HeatResult<()> {
        if self.matrix.is_empty() {
            return Err(HeatError::EmptyMatrix);
        }
        self.matrix = self.matrix.transposed();
        std::mem::swap(&mut self.row_labels, &mut self.col_labels);
        Ok(())
    }

    /// Append an annotation at the cell addressed by indices into the
    /// current labels.
    ///
    /// Indices are resolved to label strings at call time. Out-of-bounds
    /// indices and empty/whitespace-only text are validation errors.
    pub fn add_annotation(&mut self, row: usize, col: usize, text: &str) -> HeatResult<()> {
        let (row_label, col_label) = self.labels_at(row, col)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(HeatError::EmptyAnnotationText);
        }

        let annotation = Annotation::new(row_label, col_label, text);
        self.annotations.push(annotation);
        Ok(())
    }

    /// Resolve cell indices to their current labels (used both for
    /// annotation creation and for pre-filling an edit surface after a
    /// cell click).
    pub fn labels_at(&self, row: usize, col: usize) -> HeatResult<(String, String)> {
        let row_label = self
            .row_labels
            .get(row)
            .ok_or(HeatError::RowIndexOutOfBounds {
                index: row,
                count: self.row_labels.len(),
            })?;
        let col_label = self
            .col_labels
            .get(col)
            .ok_or(HeatError::ColIndexOutOfBounds {
                index: col,
                count: self.col_labels.len(),
            })?;
        Ok((row_label.clone(), col_label.clone()))
    }

    /// Empty the annotation sequence.
    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    /// Dump the current annotations as a JSON array.
    pub fn export_annotations(&self) -> HeatResult<String> {
        annotation::export(&self.annotations)
    }

    /// Replace the annotation sequence wholesale with a parsed JSON array.
    ///
    /// The current sequence is untouched if parsing fails.
    pub fn import_annotations(&mut self, json: &str) -> HeatResult<()> {
        self.annotations = annotation::import(json)?;
        Ok(())
    }
}
