//! Heatmap view-state for heatsheet
//!
//! The single mutable aggregate of matrix, labels, annotations, and display
//! options that drives rendering, plus the canonical operations that
//! transform it. Frontends translate user actions into [`Intent`] values
//! and funnel everything through [`ViewState::apply`].
//!
//! # Examples
//!
//! ```
//! use heatsheet_matrix::{parse, Delimiter};
//! use heatsheet_state::{Intent, OptionChange, ViewState};
//!
//! let table = parse(",A,B\nR1,1,2\nR2,3,4\n", Delimiter::Comma).unwrap();
//!
//! let mut state = ViewState::new();
//! state.apply(Intent::Load { table, title: None }).unwrap();
//! state.apply(Intent::Set(OptionChange::Colorscale("Plasma".into()))).unwrap();
//! state.apply(Intent::Transpose).unwrap();
//!
//! assert_eq!(state.row_labels(), ["A", "B"]);
//! ```

mod annotation;
mod intent;
mod options;
mod view;

/// Re-export annotation types and their JSON import/export.
pub use annotation::{export as export_annotations, import as import_annotations};
pub use annotation::{Annotation, AnnotationFont, AnnotationStyle};
/// Re-export the intent union.
pub use intent::Intent;
/// Re-export display option types.
pub use options::{ColorbarPosition, DisplayOptions, OptionChange, Theme};
/// Re-export the view-state aggregate.
pub use view::ViewState;
