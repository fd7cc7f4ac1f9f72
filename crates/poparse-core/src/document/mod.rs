//! In-memory document grid and the loaders that produce it.
//!
//! Every source format (spreadsheet workbook, CSV export, text PDF) is turned
//! into a [`Sheet`]; the extraction pipeline only ever reads cells through the
//! accessors defined here.

mod csv;
mod spreadsheet;

pub use self::csv::read_csv;
pub use spreadsheet::{read_first_worksheet, sheet_from_range};

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{DocumentError, Result};
use crate::models::config::PoParseConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Default number of rows the resilient accessor looks upward.
pub const DEFAULT_UPWARD_SEARCH_ROWS: usize = 5;

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Cell {
    /// Build a cell from free text; blank text becomes [`Cell::Empty`].
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    /// Whether the cell carries no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cleaned textual rendering of the cell.
    ///
    /// Integral numbers drop the fractional part, dates render as
    /// `DD-MM-YYYY`.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => clean(s),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(true) => "TRUE".to_string(),
            Cell::Bool(false) => "FALSE".to_string(),
            Cell::Date(dt) => dt.format("%d-%m-%Y").to_string(),
        }
    }

    /// The calendar date of a date-typed cell.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(dt) => Some(dt.date()),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::from_text(text)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// Collapse all whitespace runs (newlines included) to single spaces and trim.
pub fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// A read-only grid of cells addressed by 1-based (row, column).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
    max_column: usize,
    upward_search_rows: usize,
}

impl Sheet {
    /// Build a sheet from rows of cells. Ragged rows are allowed.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let max_column = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            rows,
            max_column,
            upward_search_rows: DEFAULT_UPWARD_SEARCH_ROWS,
        }
    }

    /// Build a sheet of text cells.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| Cell::from_text(s.as_ref())).collect())
                .collect(),
        )
    }

    /// Override how far blank cells look upward for a value.
    pub fn with_upward_search(mut self, rows: usize) -> Self {
        self.upward_search_rows = rows;
        self
    }

    /// Index of the last row.
    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    /// Index of the last column.
    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// The typed cell at a position, if inside the grid.
    pub fn raw(&self, row: usize, col: usize) -> Option<&Cell> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows.get(row - 1)?.get(col - 1)
    }

    /// Cleaned value at a position, without looking at neighbours.
    pub fn value(&self, row: usize, col: usize) -> String {
        self.raw(row, col).map(Cell::text).unwrap_or_default()
    }

    /// Cleaned value at a position; a blank cell takes the first non-blank
    /// value found in the same column within the upward search window.
    ///
    /// Vertically merged header cells only store their value in the top cell.
    pub fn cell(&self, row: usize, col: usize) -> String {
        let value = self.value(row, col);
        if !value.is_empty() {
            return value;
        }
        (1..=self.upward_search_rows)
            .take_while(|offset| *offset < row)
            .map(|offset| self.value(row - offset, col))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    /// Direct values of every column in a row.
    pub fn row_values(&self, row: usize) -> Vec<String> {
        (1..=self.max_column).map(|c| self.value(row, c)).collect()
    }

    /// Resilient values of every column in a row.
    pub fn resilient_row(&self, row: usize) -> Vec<String> {
        (1..=self.max_column).map(|c| self.cell(row, c)).collect()
    }

    /// Space-joined resilient text of the first `rows` rows.
    pub fn leading_text(&self, rows: usize) -> String {
        (1..=rows.min(self.max_row()))
            .flat_map(|r| self.resilient_row(r))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Source format, decided from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Workbook readable by calamine.
    Spreadsheet,
    /// Comma-separated export.
    Csv,
    /// PDF with embedded text.
    Pdf,
}

impl DocumentFormat {
    /// Detect the format of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(DocumentFormat::Spreadsheet),
            "csv" => Some(DocumentFormat::Csv),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }
}

/// Open a document and read it into a sheet.
pub fn load_document(path: &Path, config: &PoParseConfig) -> Result<Sheet> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| DocumentError::UnsupportedFormat(path.display().to_string()))?;

    debug!("Loading {:?} document from {}", format, path.display());

    let sheet = match format {
        DocumentFormat::Spreadsheet => read_first_worksheet(path)?,
        DocumentFormat::Csv => read_csv(path)?,
        DocumentFormat::Pdf => {
            let data = std::fs::read(path)?;
            let mut extractor = PdfExtractor::with_config(config.pdf.clone());
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());
            extractor.to_sheet()?
        }
    };

    debug!(
        "Loaded sheet with {} rows and {} columns",
        sheet.max_row(),
        sheet.max_column()
    );

    Ok(sheet.with_upward_search(config.scan.upward_search_rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_extra_spaces() {
        assert_eq!(clean("  Hello   World  "), "Hello World");
    }

    #[test]
    fn test_clean_removes_newlines() {
        assert_eq!(clean("Hello\nWorld"), "Hello World");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(Cell::Number(381.0).text(), "381");
        assert_eq!(Cell::Number(4993.2).text(), "4993.2");
        assert_eq!(Cell::Number(-12.0).text(), "-12");
    }

    #[test]
    fn test_date_rendering() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(date).text(), "22-10-2025");
    }

    #[test]
    fn test_cell_searches_upward_for_blank() {
        let sheet = Sheet::from_rows(vec![
            vec!["Sr No", "Description"],
            vec!["", ""],
            vec!["", "tail"],
        ]);
        assert_eq!(sheet.cell(2, 1), "Sr No");
        assert_eq!(sheet.cell(3, 1), "Sr No");
        assert_eq!(sheet.cell(3, 2), "tail");
        assert_eq!(sheet.value(3, 1), "");
    }

    #[test]
    fn test_upward_search_is_bounded() {
        let mut rows = vec![vec!["top"]];
        rows.extend(std::iter::repeat(vec![""]).take(6));
        let sheet = Sheet::from_rows(rows);

        assert_eq!(sheet.cell(6, 1), "top");
        assert_eq!(sheet.cell(7, 1), "");
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let sheet = Sheet::from_rows(vec![vec!["a"]]);
        assert_eq!(sheet.cell(10, 10), "");
        assert_eq!(sheet.cell(0, 1), "");
        assert!(sheet.raw(1, 2).is_none());
    }

    #[test]
    fn test_ragged_rows_pad_to_max_column() {
        let sheet = Sheet::from_rows(vec![vec!["a"], vec!["b", "c", "d"]]);
        assert_eq!(sheet.max_column(), 3);
        assert_eq!(sheet.row_values(1), vec!["a", "", ""]);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("pi.XLSX")),
            Some(DocumentFormat::Spreadsheet)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("po.pdf")), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_path(Path::new("po.csv")), Some(DocumentFormat::Csv));
        assert_eq!(DocumentFormat::from_path(Path::new("po.docx")), None);
    }

    #[test]
    fn test_load_unsupported_format() {
        let err = load_document(Path::new("notes.txt"), &PoParseConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported document format"));
    }
}
