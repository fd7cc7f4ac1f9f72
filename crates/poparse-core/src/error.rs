//! Error types for the poparse-core library.

use thiserror::Error;

/// Main error type for the poparse library.
#[derive(Error, Debug)]
pub enum PoParseError {
    /// The document is structurally unparseable as the requested type.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The document could not be opened or read.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// The structural parse failure.
///
/// Only the absence of a line-item header row is fatal; every other
/// missing or malformed value degrades to an empty/zero default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No row carries the serial, description and quantity/rate markers.
    #[error("unparseable document: line-item header row not found")]
    HeaderNotFound,
}

/// Errors related to opening and reading source documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the workbook or file.
    #[error("failed to open document: {0}")]
    Open(String),

    /// File extension is not a supported spreadsheet, CSV or PDF type.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The workbook contains no worksheet to read.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// Failed to parse the PDF structure or extract its text.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF carries no extractable text (scanned image).
    #[error("PDF has no extractable text")]
    NoText,
}

/// Result type for the poparse library.
pub type Result<T> = std::result::Result<T, PoParseError>;
