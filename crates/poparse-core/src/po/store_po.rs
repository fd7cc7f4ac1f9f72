//! Retail store purchase-order parser.
//!
//! Store POs carry a delivery address, a numeric PO reference and a single
//! amount column next to a DESCRIPTION header. Cells are read directly,
//! without the upward search used for BOQ headers, and nothing here is
//! fatal: anything not found becomes a placeholder plus a warning.

use std::cmp::Ordering;

use tracing::{debug, info};

use super::rules::patterns::{INLINE_VALUE_SEPARATOR, PO_DIGITS, STORE_CODE, STORE_CODE_LABELED};
use super::rules::{contains_any, parse_amount};
use super::DocumentParser;
use crate::document::Sheet;
use crate::error::Result;
use crate::models::config::StorePoConfig;
use crate::models::po::{HeaderField, HeaderFields, LineItem, ParseResult, ParserKind, PoDetails, SummaryTotals};

pub const UNKNOWN_SITE: &str = "UNKNOWN_SITE";
pub const UNKNOWN_STORE: &str = "UNKNOWN_STORE";
pub const UNKNOWN_PO: &str = "UNKNOWN_PO";

const SITE_KEYWORDS: &[&str] = &["SHIP TO", "DELIVERY TO", "SITE ADDRESS", "DELIVERY ADDRESS"];

/// Location of the item table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemHeader {
    row: usize,
    desc_col: Option<usize>,
    qty_col: Option<usize>,
}

/// Parser for store purchase orders.
#[derive(Debug, Clone, Default)]
pub struct StorePoParser {
    config: StorePoConfig,
}

impl StorePoParser {
    /// Create a parser with default scan limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scan limits.
    pub fn with_config(mut self, config: StorePoConfig) -> Self {
        self.config = config;
        self
    }

    fn extract_site_address(&self, sheet: &Sheet) -> Option<String> {
        let excluded = |text: &str| text.to_uppercase().contains("DESCRIPTION");

        for row in 1..=sheet.max_row().min(self.config.site_scan_rows) {
            for col in 1..=sheet.max_column() {
                let raw = sheet.value(row, col);
                if raw.is_empty() || excluded(&raw) {
                    continue;
                }
                if !contains_any(&raw.to_uppercase(), SITE_KEYWORDS) {
                    continue;
                }

                let right = sheet.value(row, col + 1);
                if !right.is_empty() && !excluded(&right) {
                    return Some(right);
                }

                let below = sheet.value(row + 1, col);
                if !below.is_empty() && !excluded(&below) {
                    return Some(below);
                }

                let parts: Vec<&str> = INLINE_VALUE_SEPARATOR.splitn(&raw, 2).collect();
                if let [_, inline] = parts.as_slice() {
                    if !excluded(inline) {
                        return Some(inline.trim().to_string());
                    }
                }
            }
        }
        None
    }

    fn extract_store_code(&self, sheet: &Sheet, address: Option<&str>) -> Option<String> {
        if let Some(address) = address {
            if let Some(m) = STORE_CODE.find(&address.to_uppercase()) {
                return Some(m.as_str().to_string());
            }
        }

        let text = (1..=sheet.max_row().min(self.config.table_scan_rows))
            .flat_map(|row| sheet.row_values(row))
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        if let Some(caps) = STORE_CODE_LABELED.captures(&text) {
            return Some(caps[2].to_string());
        }

        // Longest code-like token, earliest on ties
        STORE_CODE
            .find_iter(&text)
            .map(|m| m.as_str())
            .fold(None, |best: Option<&str>, token| match best {
                Some(b) if b.len() >= token.len() => Some(b),
                _ => Some(token),
            })
            .map(str::to_string)
    }

    fn extract_po_reference(&self, sheet: &Sheet) -> (Option<String>, Option<String>) {
        let mut po_number = None;
        let mut po_date = None;

        for row in 1..=sheet.max_row().min(self.config.po_number_scan_rows) {
            for col in 1..=sheet.max_column() {
                let Some(cell) = sheet.raw(row, col).filter(|c| !c.is_blank()) else {
                    continue;
                };

                if po_number.is_none() {
                    let compact = cell.text().replace(' ', "");
                    po_number = PO_DIGITS.find(&compact).map(|m| m.as_str().to_string());
                }
                if po_date.is_none() {
                    po_date = cell.as_date().map(|d| d.format("%Y-%m-%d").to_string());
                }
            }
            if po_number.is_some() && po_date.is_some() {
                break;
            }
        }

        (po_number, po_date)
    }

    fn find_item_header(&self, sheet: &Sheet) -> Option<ItemHeader> {
        (1..=sheet.max_row().min(self.config.table_scan_rows)).find_map(|row| {
            let values: Vec<String> = sheet.row_values(row).iter().map(|v| v.to_uppercase()).collect();
            if !values.join(" ").contains("DESCRIPTION") {
                return None;
            }

            let mut header = ItemHeader {
                row,
                desc_col: None,
                qty_col: None,
            };
            for (idx, value) in values.iter().enumerate() {
                if value.contains("DESCRIPTION") {
                    header.desc_col = Some(idx + 1);
                }
                if value == "QTY" || value == "QUANTITY" {
                    header.qty_col = Some(idx + 1);
                }
            }
            Some(header)
        })
    }

    /// Column right of the description with the most numeric cells, larger
    /// column sum breaking ties.
    fn amount_column(&self, sheet: &Sheet, header: &ItemHeader) -> Option<usize> {
        let desc_col = header.desc_col?;
        let mut scores: Vec<(usize, usize, f64)> = (desc_col + 1..=sheet.max_column())
            .map(|col| {
                let amounts: Vec<f64> = (header.row + 1..=sheet.max_row())
                    .filter_map(|row| parse_amount(&sheet.value(row, col)))
                    .collect();
                (col, amounts.len(), amounts.iter().sum::<f64>())
            })
            .collect();

        scores.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
        });
        scores.first().map(|(col, _, _)| *col)
    }

    fn extract_items(&self, sheet: &Sheet, header: &ItemHeader, amount_col: usize) -> Vec<LineItem> {
        let Some(desc_col) = header.desc_col else {
            return Vec::new();
        };

        (header.row + 1..=sheet.max_row())
            .filter_map(|row| {
                let desc = sheet.value(row, desc_col);
                if desc.is_empty() || desc.to_uppercase() == "TOTAL" {
                    return None;
                }
                let amount = round2(parse_amount(&sheet.value(row, amount_col))?);
                let quantity = header
                    .qty_col
                    .and_then(|col| parse_amount(&sheet.value(row, col)))
                    .filter(|q| *q != 0.0)
                    .unwrap_or(1.0);

                Some(LineItem {
                    boq_name: desc,
                    quantity,
                    taxable_amount: amount,
                    gross_amount: amount,
                    ..Default::default()
                })
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl DocumentParser for StorePoParser {
    fn kind(&self) -> ParserKind {
        ParserKind::PurchaseOrder
    }

    fn parse(&self, sheet: &Sheet) -> Result<ParseResult> {
        info!(
            "Parsing store purchase order from {} rows x {} columns",
            sheet.max_row(),
            sheet.max_column()
        );
        let mut warnings = Vec::new();
        let mut header = HeaderFields::default();

        let site_address = self.extract_site_address(sheet).filter(|s| !s.is_empty());
        if site_address.is_none() {
            warnings.push("Site address not detected, using UNKNOWN_SITE".to_string());
        }
        header.store_id = self
            .extract_store_code(sheet, site_address.as_deref())
            .unwrap_or_else(|| {
                warnings.push("Store ID not detected, using UNKNOWN_STORE".to_string());
                UNKNOWN_STORE.to_string()
            });
        header.ship_to_address = site_address.unwrap_or_else(|| UNKNOWN_SITE.to_string());

        let (po_number, po_date) = self.extract_po_reference(sheet);
        let po_number = po_number.unwrap_or_else(|| {
            warnings.push("PO number not detected".to_string());
            UNKNOWN_PO.to_string()
        });
        header.set(HeaderField::PoNumber, &po_number);
        header.po_date = po_date;

        let Some(item_header) = self.find_item_header(sheet) else {
            warnings.push("Line item header not detected".to_string());
            debug!("Store PO warnings: {:?}", warnings);
            let details = PoDetails {
                header,
                summary: SummaryTotals::default(),
            };
            return Ok(ParseResult::new(details, Vec::new()).with_warnings(warnings));
        };

        let line_items = match self.amount_column(sheet, &item_header) {
            Some(amount_col) => {
                debug!(
                    "Item header at row {}, description column {:?}, amount column {}",
                    item_header.row, item_header.desc_col, amount_col
                );
                self.extract_items(sheet, &item_header, amount_col)
            }
            None => {
                warnings.push("Amount column not detected".to_string());
                Vec::new()
            }
        };

        if line_items.is_empty() {
            warnings.push("No line items parsed".to_string());
        }

        let summary = SummaryTotals {
            total_amount: round2(line_items.iter().map(|i| i.gross_amount).sum()),
            ..Default::default()
        };

        debug!("Store PO {} with {} items, warnings {:?}", po_number, line_items.len(), warnings);
        Ok(ParseResult::new(PoDetails { header, summary }, line_items).with_warnings(warnings))
    }
}
