//! Label/value header fields above the item table.

use tracing::{debug, trace};

use super::rules::patterns::{PO_NUMBER_LABELED, PO_REFERENCE, STORE_ID_LABELED, STORE_ID_SEPARATED};
use super::rules::{classify, KeywordRule};
use crate::document::Sheet;
use crate::models::config::ScanConfig;
use crate::models::po::{HeaderField, HeaderFields};

const VENDOR: &[&str] = &["VENDOR", "SUPPLIER"];
const ADDRESS: &[&str] = &["ADDRESS", "ADD", "ADDR"];
const GSTIN: &[&str] = &["GSTIN", "GST", "TAX"];
const PO: &[&str] = &["PO", "PURCHASE", "ORDER"];
const PI: &[&str] = &["PI", "INVOICE", "PROFORMA"];

/// Label classification, first match wins. Address and GSTIN rules for the
/// bill-to party precede the looser client-name rule.
static LABEL_RULES: &[KeywordRule<HeaderField>] = &[
    KeywordRule { all_of: &[VENDOR, &["CO.", "NAME", "COMP"]], none_of: &[], outcome: HeaderField::VendorName },
    KeywordRule { all_of: &[VENDOR, ADDRESS], none_of: &[], outcome: HeaderField::VendorAddress },
    KeywordRule { all_of: &[VENDOR, GSTIN], none_of: &[], outcome: HeaderField::VendorGstin },
    KeywordRule { all_of: &[&["BILL"], ADDRESS], none_of: &[], outcome: HeaderField::BillToAddress },
    KeywordRule { all_of: &[&["BILL"], GSTIN], none_of: &[], outcome: HeaderField::BillToGstin },
    KeywordRule { all_of: &[&["BILL", "CLIENT"], &["TO", "NAME"]], none_of: &[], outcome: HeaderField::ClientName },
    KeywordRule {
        all_of: &[&["SHIP"], &["TO", "NAME", "ADDRESS", "ADD", "ADDR"]],
        none_of: &[],
        outcome: HeaderField::ShipToAddress,
    },
    KeywordRule {
        all_of: &[&["PO", "PURCHASE", "ORDER", "REF"], &["NO", "NUMBER", "REF", "#"]],
        none_of: &["DATE"],
        outcome: HeaderField::PoNumber,
    },
    KeywordRule { all_of: &[PI, &["NO", "NUMBER", "#"]], none_of: &["DATE"], outcome: HeaderField::PiNumber },
    KeywordRule { all_of: &[PI, &["DATE"]], none_of: &[], outcome: HeaderField::PiDate },
    KeywordRule { all_of: &[PO, &["DATE"]], none_of: &[], outcome: HeaderField::PoDate },
    KeywordRule { all_of: &[&["SITE", "LOCATION"], &["NAME"]], none_of: &["ID"], outcome: HeaderField::SiteName },
];

/// Classify an upper-cased label.
pub fn classify_label(label: &str) -> Option<HeaderField> {
    classify(LABEL_RULES, label)
}

/// Extract the labelled header fields.
///
/// Column 1 of each of the first rows is the label; the first non-empty of
/// the next few columns is its value. Missing fields stay empty.
pub fn extract_header_fields(sheet: &Sheet, scan: &ScanConfig) -> HeaderFields {
    let mut header = HeaderFields::default();
    let last_value_col = sheet.max_column().min(1 + scan.value_columns);

    for row in 1..=sheet.max_row().min(scan.header_field_rows) {
        let label = sheet.cell(row, 1).to_uppercase();
        let value = (2..=last_value_col)
            .map(|col| sheet.cell(row, col))
            .find(|v| !v.is_empty())
            .unwrap_or_default();

        if label.is_empty() && value.is_empty() {
            continue;
        }

        if let Some(field) = classify_label(&label) {
            trace!("Row {}: {:?} = {:?}", row, field, value);
            header.set(field, &value);
        }
    }

    if header.po_number.is_empty() {
        let text = sheet.leading_text(scan.identifier_scan_rows);
        if let Some(po_number) = first_capture(&[&*PO_NUMBER_LABELED, &*PO_REFERENCE], &text) {
            debug!("PO number {} taken from header text", po_number);
            header.set(HeaderField::PoNumber, &po_number);
        }
    }

    if header.po_number.is_empty() && !header.client_po_number.is_empty() {
        header.po_number = header.client_po_number.clone();
    }

    header
}

/// Find a store/site identifier anywhere in the leading rows.
pub fn extract_store_id(sheet: &Sheet, scan: &ScanConfig) -> Option<String> {
    let text = sheet.leading_text(scan.identifier_scan_rows);
    first_capture(&[&*STORE_ID_LABELED, &*STORE_ID_SEPARATED], &text)
}

fn first_capture(patterns: &[&regex::Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| caps[1].to_string())
}
