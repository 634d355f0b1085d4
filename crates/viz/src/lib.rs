//! # heatsheet-viz
//!
//! Rendering derivation for heatsheet.
//!
//! This crate turns a [`ViewState`] into a [`HeatmapSpec`], the complete,
//! serializable description of what a renderer should draw. The spec can be
//! rendered by:
//! - the bundled self-contained HTML/Plotly document
//! - anything implementing the [`Renderer`] adapter trait
//! - a downstream consumer of the JSON form
//!
//! Derivation is a pure function of the view-state: the same state always
//! produces an identical spec, so re-deriving after every mutation is safe.

use heatsheet_core::HeatResult;
use heatsheet_matrix::{Cell, Matrix};
use heatsheet_state::{Annotation, ColorbarPosition, Theme, ViewState};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSpec {
    pub title: String,
    /// Cell values in row-major order; missing cells serialize as `null`.
    pub z: Vec<Vec<Cell>>,
    /// Column labels (x axis).
    pub x: Vec<String>,
    /// Row labels (y axis).
    pub y: Vec<String>,
    pub colorscale: String,
    pub opacity: f64,
    pub show_x_labels: bool,
    pub show_y_labels: bool,
    pub font_size: u16,
    pub show_grid: bool,
    pub theme: Theme,
    pub colorbar: ColorbarSpec,
    /// Per-cell text overlay, present when cell values are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
    /// Annotations that resolve against the current axes.
    pub annotations: Vec<Annotation>,
}

/// Colorbar block of the spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorbarSpec {
    pub visible: bool,
    pub title: String,
    #[serde(flatten)]
    pub layout: ColorbarLayout,
}

/// Colorbar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Concrete colorbar geometry in paper coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorbarLayout {
    pub orientation: Orientation,
    pub x: f64,
    pub y: f64,
}

impl ColorbarLayout {
    /// The fixed position-to-geometry mapping.
    ///
    /// Left and right are vertical bars anchored beside the plot; top and
    /// bottom are horizontal bars centered above/below it. Renderers rely
    /// on these exact values for visual parity across frontends.
    #[must_use]
    pub fn from_position(position: ColorbarPosition) -> ColorbarLayout {
        match position {
            ColorbarPosition::Left => ColorbarLayout {
                orientation: Orientation::Vertical,
                x: -0.15,
                y: 0.5,
            },
            ColorbarPosition::Right => ColorbarLayout {
                orientation: Orientation::Vertical,
                x: 1.02,
                y: 0.5,
            },
            ColorbarPosition::Top => ColorbarLayout {
                orientation: Orientation::Horizontal,
                x: 0.5,
                y: 1.1,
            },
            ColorbarPosition::Bottom => ColorbarLayout {
                orientation: Orientation::Horizontal,
                x: 0.5,
                y: -0.2,
            },
        }
    }
}

/// Format every cell to the configured precision; missing cells are blank.
#[must_use]
pub fn value_overlay(matrix: &Matrix, precision: u8) -> Vec<Vec<String>> {
    matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_precision(precision)).collect())
        .collect()
}

/// Escape HTML special characters to prevent XSS.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl HeatmapSpec {
    /// Derive the spec from a view-state.
    ///
    /// Idempotent: an unchanged state yields an identical spec. Annotations
    /// whose labels no longer resolve against the current axes (stale after
    /// a transpose or reload) are dropped here, never an error.
    #[must_use]
    pub fn from_state(state: &ViewState) -> HeatmapSpec {
        let options = state.options();

        let annotations = state
            .annotations()
            .iter()
            .filter(|a| {
                let resolves = state.row_labels().contains(&a.row_label)
                    && state.col_labels().contains(&a.col_label);
                if !resolves {
                    tracing::warn!(
                        row_label = %a.row_label,
                        col_label = %a.col_label,
                        "dropping annotation with unresolvable labels"
                    );
                }
                resolves
            })
            .cloned()
            .collect();

        let values = options
            .show_cell_values
            .then(|| value_overlay(state.matrix(), options.decimal_precision));

        HeatmapSpec {
            title: options.title.clone(),
            z: state.matrix().rows().to_vec(),
            x: state.col_labels().to_vec(),
            y: state.row_labels().to_vec(),
            colorscale: options.resolved_colorscale(),
            opacity: options.opacity,
            show_x_labels: options.show_col_labels,
            show_y_labels: options.show_row_labels,
            font_size: options.font_size,
            show_grid: options.show_grid,
            theme: options.theme,
            colorbar: ColorbarSpec {
                visible: options.show_colorbar,
                title: options.colorbar_title.clone(),
                layout: ColorbarLayout::from_position(options.colorbar_position),
            },
            values,
            annotations,
        }
    }

    /// Convert to JSON for IPC or downstream renderers.
    pub fn to_json(&self) -> HeatResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate a self-contained HTML document with an embedded Plotly
    /// heatmap. `export_format` controls the format of the renderer's
    /// image-download button.
    #[must_use]
    pub fn to_html(&self, export_format: ExportFormat) -> String {
        // Escape title for HTML context and JSON for script context
        let title = escape_html(&self.title);
        let json = serde_json::to_string(self)
            .unwrap_or_default()
            .replace("</", "<\\/"); // Prevent script tag breakout

        let format = match export_format {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
</head>
<body>
    <div id="heatmap"></div>
    <script>
        const spec = {json};
        const trace = {{
            type: 'heatmap',
            z: spec.z,
            x: spec.x,
            y: spec.y,
            colorscale: spec.colorscale.replace(/_r$/, ''),
            reversescale: spec.colorscale.endsWith('_r'),
            opacity: spec.opacity,
            showscale: spec.colorbar.visible,
            colorbar: {{
                title: spec.colorbar.title,
                orientation: spec.colorbar.orientation === 'horizontal' ? 'h' : 'v',
                x: spec.colorbar.x,
                y: spec.colorbar.y
            }},
            text: spec.values,
            texttemplate: spec.values ? '%{{text}}' : undefined
        }};
        const layout = {{
            title: spec.title,
            paper_bgcolor: spec.theme === 'dark' ? '#111' : '#fff',
            plot_bgcolor: spec.theme === 'dark' ? '#111' : '#fff',
            font: {{
                size: spec.font_size,
                color: spec.theme === 'dark' ? '#eee' : '#111'
            }},
            xaxis: {{ showticklabels: spec.show_x_labels, showgrid: spec.show_grid, automargin: true }},
            yaxis: {{ showticklabels: spec.show_y_labels, showgrid: spec.show_grid, automargin: true }},
            annotations: spec.annotations.map(a => ({{
                x: a.col_label,
                y: a.row_label,
                text: a.text,
                showarrow: a.style.arrow,
                ax: a.style.offset[0],
                ay: a.style.offset[1],
                font: {{ color: a.style.font.color, size: a.style.font.size }},
                bgcolor: a.style.background,
                opacity: a.style.opacity
            }}))
        }};
        Plotly.newPlot('heatmap', [trace], layout, {{
            responsive: true,
            toImageButtonOptions: {{ format: '{format}' }}
        }});
    </script>
</body>
</html>"#,
            title = title,
            json = json,
            format = format,
        )
    }
}

/// Image formats a renderer can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl std::str::FromStr for ExportFormat {
    type Err = heatsheet_core::HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(heatsheet_core::HeatError::invalid_option(
                "image format",
                other,
                "png|svg",
            )),
        }
    }
}

/// Inbound event from an interactive renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    /// The user clicked the cell at (row, col).
    CellClick { row: usize, col: usize },
}

/// The adapter seam between the view-state and an actual rendering engine.
///
/// `render` must be idempotent for an unchanged spec, so callers are free
/// to re-render after every mutation. Interactive adapters surface clicks
/// through `next_event`; non-interactive ones use the default.
pub trait Renderer {
    fn render(&mut self, spec: &HeatmapSpec) -> HeatResult<()>;

    fn next_event(&mut self) -> Option<RenderEvent> {
        None
    }
}

/// Renderer that writes the Plotly HTML document to a file on every render.
#[derive(Debug)]
pub struct HtmlFileRenderer {
    path: std::path::PathBuf,
    export_format: ExportFormat,
}

impl HtmlFileRenderer {
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>, export_format: ExportFormat) -> Self {
        HtmlFileRenderer {
            path: path.into(),
            export_format,
        }
    }
}

impl Renderer for HtmlFileRenderer {
    fn render(&mut self, spec: &HeatmapSpec) -> HeatResult<()> {
        std::fs::write(&self.path, spec.to_html(self.export_format))?;
        Ok(())
    }
}
