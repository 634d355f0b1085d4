//! # heatsheet-cli
//!
//! Command-line frontend for heatsheet: loads a delimited matrix file,
//! translates flags into view-state intents, and emits a rendered artifact
//! (a self-contained Plotly HTML page, or the heatmap spec as JSON).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use heatsheet_core::{ErrorKind, HeatError};
use heatsheet_matrix::Delimiter;
use heatsheet_state::{ColorbarPosition, Intent, OptionChange, Theme, ViewState};
use heatsheet_viz::{ExportFormat, HeatmapSpec, HtmlFileRenderer, Renderer};
use tracing_subscriber::EnvFilter;

/// heatsheet - render CSV/TSV matrices as annotated heatmaps
#[derive(Parser)]
#[command(name = "heatsheet")]
#[command(author, version, about = "Render CSV/TSV matrices as annotated heatmaps", long_about = None)]
struct Cli {
    /// Input matrix file (CSV or TSV)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Field delimiter, comma|tab (inferred from filename and content when omitted)
    #[arg(long)]
    delimiter: Option<Delimiter>,

    /// Plot title
    #[arg(long)]
    title: Option<String>,

    /// Colorscale name
    #[arg(long)]
    colorscale: Option<String>,

    /// Reverse the colorscale
    #[arg(long)]
    reverse_scale: bool,

    /// Heatmap opacity in [0, 1]
    #[arg(long)]
    opacity: Option<f64>,

    /// Hide the colorbar
    #[arg(long)]
    hide_colorbar: bool,

    /// Colorbar position, left|right|top|bottom
    #[arg(long)]
    colorbar_position: Option<ColorbarPosition>,

    /// Colorbar title
    #[arg(long)]
    colorbar_title: Option<String>,

    /// Tick label font size
    #[arg(long)]
    font_size: Option<u16>,

    /// Hide row labels
    #[arg(long)]
    hide_row_labels: bool,

    /// Hide column labels
    #[arg(long)]
    hide_col_labels: bool,

    /// Show grid lines
    #[arg(long)]
    show_grid: bool,

    /// Theme, light|dark
    #[arg(long)]
    theme: Option<Theme>,

    /// Print each cell's value on its tile
    #[arg(long)]
    show_values: bool,

    /// Decimal places for the cell value overlay
    #[arg(long)]
    precision: Option<u8>,

    /// Set any display option by key (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    sets: Vec<String>,

    /// Transpose the matrix before rendering
    #[arg(long)]
    transpose: bool,

    /// Import annotations from a JSON array file
    #[arg(long, value_name = "FILE")]
    annotations: Option<PathBuf>,

    /// Annotate a cell by indices (repeatable)
    #[arg(long = "annotate", value_name = "ROW,COL,TEXT")]
    annotate: Vec<String>,

    /// Write the final annotations to a JSON file (default: annotations.json)
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "annotations.json")]
    export_annotations: Option<PathBuf>,

    /// Output artifact
    #[arg(short = 'f', long = "format", default_value = "html", value_enum)]
    format: ArtifactFormat,

    /// Image format for the rendered page's download button, png|svg
    #[arg(long, default_value = "png")]
    image_format: ExportFormat,

    /// Output path (stdout when omitted)
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Artifact emitted after all intents are applied.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum ArtifactFormat {
    /// Self-contained Plotly HTML page (default)
    #[default]
    Html,
    /// Heatmap spec as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    if let Err(err) = run(cli) {
        report(&err);
        std::process::exit(1);
    }
}

/// Print a failure the way the user should read it: validation and state
/// errors are input mistakes, everything else is a tool failure.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<HeatError>().map(HeatError::kind) {
        Some(ErrorKind::Validation) => eprintln!("{} {err:#}", "invalid input:".yellow().bold()),
        Some(ErrorKind::State) => eprintln!("{} {err:#}", "nothing to do:".yellow().bold()),
        _ => eprintln!("{} {err:#}", "error:".red().bold()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read file: {}", cli.file.display()))?;

    let filename = cli
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let delimiter = cli
        .delimiter
        .unwrap_or_else(|| Delimiter::infer(filename, &text));
    tracing::debug!(%delimiter, "parsing input");

    let table = heatsheet_matrix::parse(&text, delimiter)?;

    let mut state = ViewState::new();
    for intent in collect_intents(&cli, table)? {
        state.apply(intent)?;
    }

    if let Some(path) = &cli.export_annotations {
        std::fs::write(path, state.export_annotations()?)
            .with_context(|| format!("failed to write annotations: {}", path.display()))?;
    }

    let spec = HeatmapSpec::from_state(&state);
    emit(&cli, &spec)
}

/// Translate every flag into an intent, in load -> options -> transpose ->
/// annotations order.
fn collect_intents(cli: &Cli, table: heatsheet_matrix::ParsedTable) -> Result<Vec<Intent>> {
    let mut intents = vec![Intent::Load {
        table,
        title: cli.title.clone(),
    }];

    let mut set = |change: OptionChange| intents.push(Intent::Set(change));
    if let Some(scale) = &cli.colorscale {
        set(OptionChange::Colorscale(scale.clone()));
    }
    if cli.reverse_scale {
        set(OptionChange::ReverseScale(true));
    }
    if let Some(opacity) = cli.opacity {
        set(OptionChange::Opacity(opacity));
    }
    if cli.hide_colorbar {
        set(OptionChange::ShowColorbar(false));
    }
    if let Some(position) = cli.colorbar_position {
        set(OptionChange::ColorbarPosition(position));
    }
    if let Some(title) = &cli.colorbar_title {
        set(OptionChange::ColorbarTitle(title.clone()));
    }
    if let Some(size) = cli.font_size {
        set(OptionChange::FontSize(size));
    }
    if cli.hide_row_labels {
        set(OptionChange::ShowRowLabels(false));
    }
    if cli.hide_col_labels {
        set(OptionChange::ShowColLabels(false));
    }
    if cli.show_grid {
        set(OptionChange::ShowGrid(true));
    }
    if let Some(theme) = cli.theme {
        set(OptionChange::Theme(theme));
    }
    if cli.show_values {
        set(OptionChange::ShowCellValues(true));
    }
    if let Some(precision) = cli.precision {
        set(OptionChange::DecimalPrecision(precision));
    }
    for pair in &cli.sets {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid --set '{pair}', expected KEY=VALUE"))?;
        intents.push(Intent::Set(OptionChange::parse(key, value)?));
    }

    if cli.transpose {
        intents.push(Intent::Transpose);
    }

    if let Some(path) = &cli.annotations {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read annotations: {}", path.display()))?;
        intents.push(Intent::ImportAnnotations(json));
    }
    for entry in &cli.annotate {
        let (row, col, text) = parse_annotate(entry)?;
        intents.push(Intent::AddAnnotation { row, col, text });
    }

    Ok(intents)
}

/// Parse one `--annotate ROW,COL,TEXT` argument.
fn parse_annotate(entry: &str) -> Result<(usize, usize, String)> {
    let mut parts = entry.splitn(3, ',');
    let (row, col, text) = match (parts.next(), parts.next(), parts.next()) {
        (Some(row), Some(col), Some(text)) => (row, col, text),
        _ => anyhow::bail!("invalid --annotate '{entry}', expected ROW,COL,TEXT"),
    };

    let row: usize = row
        .trim()
        .parse()
        .with_context(|| format!("invalid row index in --annotate '{entry}'"))?;
    let col: usize = col
        .trim()
        .parse()
        .with_context(|| format!("invalid column index in --annotate '{entry}'"))?;
    Ok((row, col, text.to_string()))
}

fn emit(cli: &Cli, spec: &HeatmapSpec) -> Result<()> {
    match cli.format {
        ArtifactFormat::Html => match &cli.out {
            Some(path) => {
                let mut renderer = HtmlFileRenderer::new(path, cli.image_format);
                renderer.render(spec)?;
                tracing::debug!(path = %path.display(), "wrote heatmap page");
            }
            None => println!("{}", spec.to_html(cli.image_format)),
        },
        ArtifactFormat::Json => {
            let json = spec.to_json()?;
            match &cli.out {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("failed to write spec: {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotate() {
        let (row, col, text) = parse_annotate("0,1,peak value, really").unwrap();
        assert_eq!(row, 0);
        assert_eq!(col, 1);
        assert_eq!(text, "peak value, really");
    }

    #[test]
    fn test_parse_annotate_rejects_garbage() {
        assert!(parse_annotate("1,2").is_err());
        assert!(parse_annotate("a,b,c").is_err());
    }

    #[test]
    fn test_collect_intents_ordering() {
        let cli = Cli::parse_from([
            "heatsheet",
            "in.csv",
            "--transpose",
            "--opacity",
            "0.5",
            "--annotate",
            "0,0,hi",
        ]);
        let table =
            heatsheet_matrix::parse(",A\nR1,1\n", Delimiter::Comma).unwrap();

        let intents = collect_intents(&cli, table).unwrap();
        assert!(matches!(intents[0], Intent::Load { .. }));
        assert!(matches!(
            intents[1],
            Intent::Set(OptionChange::Opacity(_))
        ));
        assert!(matches!(intents[2], Intent::Transpose));
        assert!(matches!(intents[3], Intent::AddAnnotation { .. }));
    }

    #[test]
    fn test_set_flag_rejects_bad_enum() {
        let cli = Cli::parse_from([
            "heatsheet",
            "in.csv",
            "--set",
            "colorbarPosition=diagonal",
        ]);
        let table = heatsheet_matrix::parse(",A\nR1,1\n", Delimiter::Comma).unwrap();
        assert!(collect_intents(&cli, table).is_err());
    }
}
