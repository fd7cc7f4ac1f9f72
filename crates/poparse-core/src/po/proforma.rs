//! Proforma-invoice / BOQ parser.

use std::time::Instant;

use tracing::{debug, info};

use super::columns::map_columns;
use super::header_fields::{extract_header_fields, extract_store_id};
use super::header_row::find_header_row;
use super::line_items::extract_line_items;
use super::summary::extract_summary;
use super::DocumentParser;
use crate::document::Sheet;
use crate::error::Result;
use crate::models::config::ScanConfig;
use crate::models::po::{ParseResult, ParserKind, PoDetails};

/// Parser for template-free BOQ spreadsheets with a GST summary.
///
/// Fails only when no line-item header row can be found; every other
/// missing value degrades to an empty or zero default.
#[derive(Debug, Clone, Default)]
pub struct ProformaInvoiceParser {
    scan: ScanConfig,
}

impl ProformaInvoiceParser {
    /// Create a parser with default scan limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scan limits.
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }
}

impl DocumentParser for ProformaInvoiceParser {
    fn kind(&self) -> ParserKind {
        ParserKind::ProformaInvoice
    }

    fn parse(&self, sheet: &Sheet) -> Result<ParseResult> {
        let start = Instant::now();
        info!(
            "Parsing proforma invoice from {} rows x {} columns",
            sheet.max_row(),
            sheet.max_column()
        );

        let header_row = find_header_row(sheet)?;

        let mut header = extract_header_fields(sheet, &self.scan);
        if let Some(store_id) = extract_store_id(sheet, &self.scan) {
            header.store_id = store_id;
        }

        let columns = map_columns(sheet, header_row, &self.scan);
        let (line_items, summary_start) = extract_line_items(sheet, header_row, &columns);
        let summary = extract_summary(sheet, summary_start);

        debug!(
            "Parsed PI {:?} with {} items in {} ms",
            header.pi_number,
            line_items.len(),
            start.elapsed().as_millis()
        );

        Ok(ParseResult::new(PoDetails { header, summary }, line_items))
    }
}
