use heatsheet_core::{HeatError, HeatResult};
use serde::{Deserialize, Serialize};

/// A text annotation attached to a (row label, column label) coordinate.
///
/// Coordinates are label strings, not indices: they survive reloads and
/// transposes verbatim, and a label that no longer exists simply orphans
/// the annotation (it is dropped at render time, never an error).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub row_label: String,
    pub col_label: String,
    pub text: String,
    pub style: AnnotationStyle,
}

impl Annotation {
    /// Create an annotation with the default visual style.
    #[must_use]
    pub fn new(
        row_label: impl Into<String>,
        col_label: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Annotation {
            row_label: row_label.into(),
            col_label: col_label.into(),
            text: text.into(),
            style: AnnotationStyle::default(),
        }
    }
}

/// Visual style of one annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub arrow: bool,
    pub offset: (f64, f64),
    pub font: AnnotationFont,
    pub background: String,
    pub opacity: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        AnnotationStyle {
            arrow: true,
            offset: (0.0, -30.0),
            font: AnnotationFont::default(),
            background: "#31316e".to_string(),
            opacity: 0.8,
        }
    }
}

/// Annotation label font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationFont {
    pub color: String,
    pub size: u16,
}

impl Default for AnnotationFont {
    fn default() -> Self {
        AnnotationFont {
            color: "#fff".to_string(),
            size: 13,
        }
    }
}

/// Serialize annotations as a pretty JSON array, the `annotations.json`
/// artifact shape.
pub fn export(annotations: &[Annotation]) -> HeatResult<String> {
    Ok(serde_json::to_string_pretty(annotations)?)
}

/// Parse an annotation sequence from JSON.
///
/// The top level must be an array. Items are trusted structurally: every
/// field is optional and defaults, so partial objects import unchanged.
/// The one per-item floor is being an object at all: a non-object item
/// (a bare number, say) fails with [`HeatError::MalformedAnnotation`]
/// instead of importing as an all-defaults annotation.
pub fn import(json: &str) -> HeatResult<Vec<Annotation>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(HeatError::NotAList {
                got: json_type_name(&other).to_string(),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|_| HeatError::MalformedAnnotation { index })
        })
        .collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
