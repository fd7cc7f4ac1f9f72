//! PO / proforma-invoice field extraction.

pub mod columns;
mod factory;
pub mod header_fields;
pub mod header_row;
pub mod line_items;
mod proforma;
pub mod rules;
mod store_po;
pub mod summary;

pub use columns::{map_columns, ColumnMap, ColumnRole};
pub use factory::ParserFactory;
pub use header_fields::{extract_header_fields, extract_store_id};
pub use header_row::find_header_row;
pub use line_items::extract_line_items;
pub use proforma::ProformaInvoiceParser;
pub use store_po::StorePoParser;
pub use summary::extract_summary;

use crate::document::Sheet;
use crate::error::Result;
use crate::models::po::{ParseResult, ParserKind};

/// Trait for document parsers.
pub trait DocumentParser {
    /// Profile this parser implements.
    fn kind(&self) -> ParserKind;

    /// Parse a loaded sheet.
    fn parse(&self, sheet: &Sheet) -> Result<ParseResult>;
}
