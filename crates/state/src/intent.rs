use heatsheet_core::HeatResult;
use heatsheet_matrix::ParsedTable;
use serde::{Deserialize, Serialize};

use crate::options::OptionChange;
use crate::view::ViewState;

/// A discrete user action, expressed as data.
///
/// Every control surface (CLI flag, click handler, script) translates what
/// the user did into one of these and hands it to [`ViewState::apply`];
/// there is exactly one transition function per action, which keeps the
/// state machine testable without any UI attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    /// Replace the loaded matrix (successful file load).
    Load {
        table: ParsedTable,
        title: Option<String>,
    },
    /// Change one display option.
    Set(OptionChange),
    /// Restore default display options.
    ResetOptions,
    /// Swap the axes.
    Transpose,
    /// Annotate the cell at (row, col) in current label order.
    AddAnnotation {
        row: usize,
        col: usize,
        text: String,
    },
    /// Drop all annotations.
    ClearAnnotations,
    /// Replace annotations from a JSON array.
    ImportAnnotations(String),
}

impl ViewState {
    /// Apply one intent; on error the state is unchanged.
    pub fn apply(&mut self, intent: Intent) -> HeatResult<()> {
        match intent {
            Intent::Load { table, title } => {
                self.load(table, title);
                Ok(())
            }
            Intent::Set(change) => {
                self.set(change);
                Ok(())
            }
            Intent::ResetOptions => {
                self.reset_options();
                Ok(())
            }
            Intent::Transpose => self.transpose(),
            Intent::AddAnnotation { row, col, text } => self.add_annotation(row, col, &text),
            Intent::ClearAnnotations => {
                self.clear_annotations();
                Ok(())
            }
            Intent::ImportAnnotations(json) => self.import_annotations(&json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsheet_core::HeatError;
    use heatsheet_matrix::{parse, Delimiter};

    fn table() -> ParsedTable {
        parse(",A,B\nR1,1,2\nR2,3,4\n", Delimiter::Comma).unwrap()
    }

    #[test]
    fn test_apply_sequence() {
        let mut state = ViewState::new();
        state
            .apply(Intent::Load {
                table: table(),
                title: Some("demo".to_string()),
            })
            .unwrap();
        state
            .apply(Intent::Set(OptionChange::ShowCellValues(true)))
            .unwrap();
        state.apply(Intent::Transpose).unwrap();
        state
            .apply(Intent::AddAnnotation {
                row: 0,
                col: 1,
                text: "note".to_string(),
            })
            .unwrap();

        assert_eq!(state.options().title, "demo");
        assert!(state.options().show_cell_values);
        assert_eq!(state.row_labels(), ["A", "B"]);
        assert_eq!(state.annotations().len(), 1);

        state.apply(Intent::ClearAnnotations).unwrap();
        assert!(state.annotations().is_empty());
    }

    #[test]
    fn test_apply_failure_leaves_state_unchanged() {
        let mut state = ViewState::new();
        state
            .apply(Intent::Load {
                table: table(),
                title: None,
            })
            .unwrap();
        let before = state.clone();

        let err = state
            .apply(Intent::AddAnnotation {
                row: 99,
                col: 0,
                text: "x".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, HeatError::RowIndexOutOfBounds { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_transpose_without_data_is_rejected() {
        let mut state = ViewState::new();
        assert!(matches!(
            state.apply(Intent::Transpose).unwrap_err(),
            HeatError::EmptyMatrix
        ));
    }

    #[test]
    fn test_intents_serialize() {
        let json = serde_json::to_string(&Intent::Transpose).unwrap();
        assert_eq!(json, r#"{"intent":"transpose"}"#);

        let json = serde_json::to_string(&Intent::Set(OptionChange::Opacity(0.5))).unwrap();
        assert!(json.contains("opacity"));
    }
}
