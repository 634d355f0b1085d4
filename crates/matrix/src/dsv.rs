use std::fmt;
use std::path::Path;
use std::str::FromStr;

use heatsheet_core::{HeatError, HeatResult};

use crate::cell::Cell;
use crate::matrix::Matrix;

/// Field delimiter for delimited text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    /// The delimiter byte, as the `csv` reader wants it.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    /// Infer the delimiter from the filename extension, falling back to
    /// counting occurrences in the first line of the content.
    ///
    /// `.tsv` means tab and `.csv` means comma regardless of content
    /// (case-insensitive). Otherwise the more frequent of tab vs comma in
    /// the header line wins; ties resolve to comma.
    #[must_use]
    pub fn infer(filename: &str, sample: &str) -> Delimiter {
        if let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) {
            if ext.eq_ignore_ascii_case("tsv") {
                return Delimiter::Tab;
            }
            if ext.eq_ignore_ascii_case("csv") {
                return Delimiter::Comma;
            }
        }

        let header = sample.lines().next().unwrap_or("");
        let tabs = header.matches('\t').count();
        let commas = header.matches(',').count();
        if tabs > commas {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

impl FromStr for Delimiter {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\t" => Ok(Delimiter::Tab),
            other => Err(HeatError::invalid_option("delimiter", other, "comma|tab")),
        }
    }
}

/// The parser's output: a labeled rectangular matrix.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub matrix: Matrix,
}

/// Parse delimited text into a labeled numeric matrix.
///
/// A leading byte-order mark is stripped and blank/whitespace-only lines are
/// discarded before anything else. The first remaining line is the header:
/// its first field is the corner cell (discarded), the rest become column
/// labels (duplicates allowed). Each further line contributes a row label
/// (first field) and numeric cells; lines with fewer than two fields are
/// skipped silently.
///
/// Rows shorter than the header are padded with [`Cell::Missing`] to the
/// column count; rows wider than the header fail with
/// [`HeatError::RowTooWide`], so the output matrix is always rectangular.
pub fn parse(text: &str, delimiter: Delimiter) -> HeatResult<ParsedTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // Keep 1-based file line numbers so diagnostics survive the blank filter.
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(HeatError::InsufficientRows { rows: lines.len() });
    }

    let mut header = split_line(lines[0].1, delimiter)?;
    if !header.is_empty() {
        header.remove(0);
    }
    let col_labels = header;
    let cols = col_labels.len();

    let mut row_labels = Vec::new();
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for &(line_no, line) in &lines[1..] {
        let fields = split_line(line, delimiter)?;
        if fields.len() < 2 {
            tracing::debug!(line = line_no, "skipping row with fewer than 2 fields");
            continue;
        }

        let cells: Vec<Cell> = fields[1..].iter().map(|f| Cell::parse(f)).collect();
        if cells.len() > cols {
            return Err(HeatError::RowTooWide {
                line: line_no,
                cells: cells.len(),
                cols,
            });
        }

        let mut row = cells;
        row.resize(cols, Cell::Missing);

        row_labels.push(fields[0].clone());
        rows.push(row);
    }

    Ok(ParsedTable {
        row_labels,
        col_labels,
        matrix: Matrix::from_rows(rows),
    })
}

/// Read a file and parse it, inferring the delimiter from its name and
/// first line.
pub fn parse_file(path: &Path) -> HeatResult<ParsedTable> {
    let text = std::fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let delimiter = Delimiter::infer(filename, &text);
    parse(&text, delimiter)
}

/// Split one line into fields, honoring quoting.
fn split_line(line: &str, delimiter: Delimiter) -> HeatResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(ToString::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_infer_tsv_extension_wins_over_content() {
        assert_eq!(Delimiter::infer("report.tsv", "a,b,c\n1,2,3"), Delimiter::Tab);
        assert_eq!(Delimiter::infer("REPORT.TSV", "a,b,c"), Delimiter::Tab);
    }

    #[test]
    fn test_infer_csv_extension_wins_over_content() {
        assert_eq!(
            Delimiter::infer("data.csv", "a\tb\tc\n1\t2\t3"),
            Delimiter::Comma
        );
    }

    #[test]
    fn test_infer_by_counting_first_line() {
        assert_eq!(Delimiter::infer("x.txt", "a\tb\tc\n1,2,3"), Delimiter::Tab);
        assert_eq!(Delimiter::infer("x.txt", "a,b,c"), Delimiter::Comma);
    }

    #[test]
    fn test_infer_tie_resolves_to_comma() {
        // one comma vs one tab
        assert_eq!(Delimiter::infer("x.txt", "a,b\tc"), Delimiter::Comma);
    }

    #[test]
    fn test_parse_worked_example() {
        let text = "\tA\tB\nR1\t1,000\tx\nR2\t2.5\t3\n";
        let delimiter = Delimiter::infer("matrix", text);
        assert_eq!(delimiter, Delimiter::Tab);

        let table = parse(text, delimiter).unwrap();
        assert_eq!(table.col_labels, vec!["A", "B"]);
        assert_eq!(table.row_labels, vec!["R1", "R2"]);
        assert_eq!(table.matrix.get(0, 0), Some(Cell::Number(1000.0)));
        assert_eq!(table.matrix.get(0, 1), Some(Cell::Missing));
        assert_eq!(table.matrix.get(1, 0), Some(Cell::Number(2.5)));
        assert_eq!(table.matrix.get(1, 1), Some(Cell::Number(3.0)));
    }

    #[test]
    fn test_parse_strips_bom() {
        let text = "\u{feff},A\nR1,1\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.col_labels, vec!["A"]);
        assert_eq!(table.row_labels, vec!["R1"]);
    }

    #[test]
    fn test_parse_discards_blank_lines() {
        let text = ",A\n\n   \nR1,1\n\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.row_labels, vec!["R1"]);
        assert_eq!(table.matrix.row_count(), 1);
    }

    #[test]
    fn test_parse_insufficient_rows() {
        for text in ["", "   \n\n", ",A,B\n", ",A,B\n\n  \n"] {
            let err = parse(text, Delimiter::Comma).unwrap_err();
            assert!(
                matches!(err, HeatError::InsufficientRows { .. }),
                "expected InsufficientRows for {text:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_skips_short_rows_silently() {
        let text = ",A,B\nR1,1,2\nlonely\nR2,3,4\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.row_labels, vec!["R1", "R2"]);
        assert_eq!(table.matrix.row_count(), 2);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let text = ",A,B,C\nR1,1\nR2,2,3,4\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.matrix.col_count(), 3);
        assert_eq!(table.matrix.get(0, 0), Some(Cell::Number(1.0)));
        assert_eq!(table.matrix.get(0, 1), Some(Cell::Missing));
        assert_eq!(table.matrix.get(0, 2), Some(Cell::Missing));
    }

    #[test]
    fn test_parse_rejects_overwide_rows() {
        let text = ",A\nR1,1,2\n";
        let err = parse(text, Delimiter::Comma).unwrap_err();
        assert!(matches!(err, HeatError::RowTooWide { line: 2, .. }));
    }

    #[test]
    fn test_parse_overwide_error_reports_file_line_number() {
        // Blank lines before the bad row must not shift the reported line.
        let text = ",A\n\n   \nR1,1\nR2,1,2\n";
        let err = parse(text, Delimiter::Comma).unwrap_err();
        assert!(
            matches!(err, HeatError::RowTooWide { line: 5, cells: 2, cols: 1 }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_duplicate_labels_allowed() {
        let text = ",A,A\nR1,1,2\nR1,3,4\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.col_labels, vec!["A", "A"]);
        assert_eq!(table.row_labels, vec!["R1", "R1"]);
    }

    #[test]
    fn test_parse_quoted_field_with_delimiter() {
        let text = ",\"A,left\",B\nR1,1,2\n";
        let table = parse(text, Delimiter::Comma).unwrap();
        assert_eq!(table.col_labels, vec!["A,left", "B"]);
    }

    #[test]
    fn test_parse_file_infers_from_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.tsv");
        fs::write(&path, "\tA\tB\nR1\t1\t2\n").unwrap();

        let table = parse_file(&path).unwrap();
        assert_eq!(table.col_labels, vec!["A", "B"]);
        assert_eq!(table.matrix.get(0, 1), Some(Cell::Number(2.0)));
    }
}
