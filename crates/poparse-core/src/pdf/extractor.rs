//! PDF text extraction using lopdf and pdf-extract.

use lazy_static::lazy_static;
use lopdf::Document;
use regex::Regex;
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::document::{Cell, Sheet};
use crate::error::DocumentError;
use crate::models::config::PdfConfig;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create an extractor with explicit tabulation settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Pdf(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract re-parses the bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Pdf(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        self.classify_text(&text)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(DocumentError::Pdf("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| DocumentError::Pdf(e.to_string()))
    }

    fn to_sheet(&self) -> Result<Sheet> {
        let text = self.extract_text()?;
        if self.classify_text(&text) == PdfType::Empty {
            return Err(DocumentError::NoText);
        }
        Ok(tabulate(&text, self.config.min_column_gap))
    }
}

impl PdfExtractor {
    fn classify_text(&self, text: &str) -> PdfType {
        let pdf_type = if text.trim().len() >= self.config.min_text_length {
            PdfType::Text
        } else {
            PdfType::Empty
        };

        debug!("PDF analysis: {} chars of text -> {:?}", text.len(), pdf_type);
        pdf_type
    }
}

lazy_static! {
    static ref SPACE_RUN: Regex = Regex::new(r"[ \x{00A0}]+").unwrap();
}

/// Split extracted PDF text into a grid: one row per non-blank line, cells
/// separated by tabs, `|` pipes, or runs of at least `min_gap` spaces.
pub fn tabulate(text: &str, min_gap: usize) -> Sheet {
    let rows: Vec<Vec<Cell>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let cells: Vec<&str> = if line.contains('\t') {
                line.split('\t').collect()
            } else if line.contains('|') {
                line.trim_matches('|').split('|').collect()
            } else {
                split_on_gaps(line, min_gap.max(1))
            };
            trace!("PDF line -> {} cells", cells.len());
            cells.into_iter().map(|c| Cell::from_text(c.trim())).collect()
        })
        .collect();

    debug!("Tabulated PDF text into {} rows", rows.len());
    Sheet::new(rows)
}

/// Split a line at every space run of `min_gap` or more characters.
fn split_on_gaps(line: &str, min_gap: usize) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    for run in SPACE_RUN.find_iter(line) {
        if run.as_str().chars().count() >= min_gap {
            cells.push(&line[start..run.start()]);
            start = run.end();
        }
    }
    cells.push(&line[start..]);
    cells
}
