//! Line-item extraction below the header row.
//!
//! Rows are consumed by a small state machine: a row either opens a new
//! item, continues the description of the open item, is skipped, or ends the
//! item block at the totals row.

use tracing::{debug, trace};

use super::columns::{ColumnMap, ColumnRole};
use super::rules::patterns::{COLUMN_KEYWORD, ITEM_BULLET, TOTALS_MARKER};
use super::rules::{is_number, to_float};
use crate::document::Sheet;
use crate::models::po::LineItem;

/// Accumulator state.
#[derive(Debug)]
enum ItemState {
    Idle,
    Accumulating(LineItem),
}

/// What a single table row means.
#[derive(Debug, PartialEq)]
enum RowAction {
    /// Totals row; the item block ends here.
    Stop,
    /// The row starts a new item.
    New(LineItem),
    /// Wrapped description text for the open item.
    Continue(String),
    Skip,
}

/// Whether the row is a summary/totals row carrying an amount.
pub fn is_totals_row(row: &[String]) -> bool {
    let text = row.join(" ").to_uppercase();
    TOTALS_MARKER.is_match(&text) && row.iter().any(|v| is_number(v))
}

fn classify_row(row: &[String], columns: &ColumnMap) -> RowAction {
    if is_totals_row(row) {
        return RowAction::Stop;
    }

    let sr = columns.value(ColumnRole::Serial, row);
    let desc = columns.value(ColumnRole::Description, row);
    let amounts = [
        ColumnRole::Quantity,
        ColumnRole::Rate,
        ColumnRole::Total,
        ColumnRole::TotalWithGst,
    ];
    let first = row.first().map(String::as_str).unwrap_or("");

    let begins_item = is_number(sr)
        || (!desc.is_empty() && amounts.iter().any(|role| is_number(columns.value(*role, row))))
        || ITEM_BULLET.is_match(first);

    if begins_item {
        return RowAction::New(build_item(row, columns));
    }

    row.iter()
        .find(|cell| {
            !cell.is_empty() && !is_number(cell) && !COLUMN_KEYWORD.is_match(&cell.to_uppercase())
        })
        .map(|fragment| RowAction::Continue(fragment.clone()))
        .unwrap_or(RowAction::Skip)
}

fn build_item(row: &[String], columns: &ColumnMap) -> LineItem {
    let sr = columns.value(ColumnRole::Serial, row);
    let taxable_amount = to_float(columns.value(ColumnRole::Total, row));
    let tax_amount = to_float(columns.value(ColumnRole::TaxAmount, row));
    let total_with_gst = columns.value(ColumnRole::TotalWithGst, row);

    let gross_amount = if total_with_gst.is_empty() {
        taxable_amount + tax_amount
    } else {
        to_float(total_with_gst)
    };

    LineItem {
        sr: is_number(sr).then(|| to_float(sr) as i64),
        boq_name: columns.value(ColumnRole::Description, row).to_string(),
        hsn_code: columns.value(ColumnRole::Hsn, row).to_string(),
        quantity: to_float(columns.value(ColumnRole::Quantity, row)),
        unit: columns.value(ColumnRole::Unit, row).to_string(),
        rate: to_float(columns.value(ColumnRole::Rate, row)),
        taxable_amount,
        tax_amount,
        total_with_gst: to_float(total_with_gst),
        gross_amount,
    }
}

fn append_description(item: &mut LineItem, fragment: &str) {
    item.boq_name = format!("{} {}", item.boq_name, fragment).trim().to_string();
}

/// Extract items from the row below `header_row` until a totals row.
///
/// Returns the items and the row the block stopped at, which is where the
/// summary starts (one past the last row if no totals row was found).
pub fn extract_line_items(sheet: &Sheet, header_row: usize, columns: &ColumnMap) -> (Vec<LineItem>, usize) {
    let mut items = Vec::new();
    let mut state = ItemState::Idle;
    let mut row = header_row + 1;

    while row <= sheet.max_row() {
        let values = sheet.row_values(row);
        let action = classify_row(&values, columns);
        trace!("Row {}: {:?}", row, action);

        match action {
            RowAction::Stop => break,
            RowAction::New(item) => {
                if let ItemState::Accumulating(done) = std::mem::replace(&mut state, ItemState::Accumulating(item)) {
                    items.push(done);
                }
            }
            RowAction::Continue(fragment) => {
                if let ItemState::Accumulating(current) = &mut state {
                    append_description(current, &fragment);
                }
            }
            RowAction::Skip => {}
        }

        row += 1;
    }

    if let ItemState::Accumulating(last) = state {
        items.push(last);
    }

    debug!("Parsed {} line items. Summary starts at row {}", items.len(), row);
    (items, row)
}
