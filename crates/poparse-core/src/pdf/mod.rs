//! PDF processing module.
//!
//! Text PDFs are read through lopdf/pdf-extract and their lines tabulated
//! into a [`Sheet`](crate::document::Sheet), so the spreadsheet pipeline
//! applies to them unchanged. Scanned (image-only) PDFs are rejected.

mod extractor;

pub use extractor::{tabulate, PdfExtractor};

use crate::document::Sheet;
use crate::error::DocumentError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// No (or too little) extractable text.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Tabulate the extracted text into a grid.
    fn to_sheet(&self) -> Result<Sheet>;
}
