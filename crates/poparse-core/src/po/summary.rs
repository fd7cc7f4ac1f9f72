//! Tax summary below the item table.

use tracing::{debug, trace};

use super::rules::patterns::{GRAND_TOTAL_LABEL, SUBTOTAL_LABEL};
use super::rules::{is_number, to_float};
use crate::document::Sheet;
use crate::models::po::SummaryTotals;

/// Summary total a row contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    Subtotal,
    Cgst,
    Sgst,
    Igst,
    TotalAmount,
}

/// Classify upper-cased row text, first match wins.
pub fn classify_summary_row(text: &str) -> Option<SummaryField> {
    if SUBTOTAL_LABEL.is_match(text) {
        Some(SummaryField::Subtotal)
    } else if text.contains("CGST") {
        Some(SummaryField::Cgst)
    } else if text.contains("SGST") {
        Some(SummaryField::Sgst)
    } else if text.contains("IGST") {
        Some(SummaryField::Igst)
    } else if GRAND_TOTAL_LABEL.is_match(text) {
        Some(SummaryField::TotalAmount)
    } else {
        None
    }
}

/// Read subtotal, GST components and grand total from `start_row` down.
///
/// The value of a row is its last numeric cell; rows without one are
/// ignored. Later rows overwrite earlier ones.
pub fn extract_summary(sheet: &Sheet, start_row: usize) -> SummaryTotals {
    let mut summary = SummaryTotals::default();

    for row in start_row.max(1)..=sheet.max_row() {
        let values = sheet.row_values(row);
        let Some(value) = values.iter().rev().find(|v| is_number(v)).map(|v| to_float(v)) else {
            continue;
        };
        let text = values.join(" ").to_uppercase();

        let Some(field) = classify_summary_row(&text) else {
            continue;
        };
        trace!("Row {}: {:?} = {}", row, field, value);

        match field {
            SummaryField::Subtotal => summary.subtotal = value,
            SummaryField::Cgst => summary.cgst = value,
            SummaryField::Sgst => summary.sgst = value,
            SummaryField::Igst => summary.igst = value,
            SummaryField::TotalAmount => summary.total_amount = value,
        }
    }

    debug!("Summary: {:?}", summary);
    summary
}
