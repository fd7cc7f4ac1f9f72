//! Core library for vendor purchase-order and proforma-invoice ingestion.
//!
//! This crate provides:
//! - Document loading (spreadsheet workbooks, CSV exports, text PDFs) into a
//!   uniform cell grid
//! - BOQ table recovery: header row detection, column mapping, multi-row
//!   line items and the GST summary
//! - A store purchase-order parser and client-based parser selection
//! - Result data models handed to the persistence layer

pub mod document;
pub mod error;
pub mod models;
pub mod pdf;
pub mod po;

pub use document::{load_document, Cell, DocumentFormat, Sheet};
pub use error::{DocumentError, ParseError, PoParseError, Result};
pub use models::config::{ClientProfile, PoParseConfig};
pub use models::po::{HeaderFields, LineItem, ParseResult, ParserKind, PoDetails, SummaryTotals};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use po::{DocumentParser, ParserFactory, ProformaInvoiceParser, StorePoParser};
