//! Common regex patterns for PO / proforma-invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line-item header row markers (matched against upper-cased row text)
    pub static ref HEADER_SERIAL: Regex = Regex::new(
        r"\b(SR|SL|NO\.?|1\.)\b"
    ).unwrap();

    pub static ref HEADER_SERIAL_LEADING: Regex = Regex::new(
        r"^\s*1\s+"
    ).unwrap();

    pub static ref HEADER_DESCRIPTION: Regex = Regex::new(
        r"\b(BOQ|DESC|PARTICULARS|ITEM|PRODUCT|DESCRIPTION)\b"
    ).unwrap();

    pub static ref HEADER_QUANTITY: Regex = Regex::new(
        r"\b(QTY|QUAN|QUANTITY|QTY\.)\b"
    ).unwrap();

    pub static ref HEADER_RATE: Regex = Regex::new(
        r"\b(RATE|PRICE|UNIT PRICE)\b"
    ).unwrap();

    // Item block
    pub static ref TOTALS_MARKER: Regex = Regex::new(
        r"\b(TOTAL|GRAND TOTAL|NET PAYABLE|SUBTOTAL|AMOUNT DUE)\b"
    ).unwrap();

    pub static ref ITEM_BULLET: Regex = Regex::new(
        r"^\d+[\.\)]"
    ).unwrap();

    pub static ref COLUMN_KEYWORD: Regex = Regex::new(
        r"\b(QTY|RATE|AMOUNT|TOTAL|GST|CGST|SGST|IGST)\b"
    ).unwrap();

    // Summary rows
    pub static ref SUBTOTAL_LABEL: Regex = Regex::new(
        r"^\s*(SUB\s*-?\s*)?TOTAL\b"
    ).unwrap();

    pub static ref GRAND_TOTAL_LABEL: Regex = Regex::new(
        r"(PI TOTAL|GRAND TOTAL|NET PAYABLE|AMOUNT DUE)"
    ).unwrap();

    // PO / reference number fallbacks over the header text
    pub static ref PO_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)(?:PO|P\.O\.?|PURCHASE\s*ORDER)\s*(?:NO|NUMBER|#|REF)?\s*[:\-]?\s*([A-Z0-9/\-_]+)"
    ).unwrap();

    pub static ref PO_REFERENCE: Regex = Regex::new(
        r"(?i)(?:CLIENT\s*REF|CUSTOMER\s*REF|REF|REFERENCE)\s*[:\-]?\s*([A-Z0-9/\-_]+)"
    ).unwrap();

    // Store / site identifiers over the header text
    pub static ref STORE_ID_LABELED: Regex = Regex::new(
        r"(?i)(?:STORE|SITE|LOCATION|OUTLET|BRANCH|UNIT)\s*(?:ID|CODE|NO|#|REF)?\s*[:\-]?\s*([A-Z0-9/\-_]+)"
    ).unwrap();

    pub static ref STORE_ID_SEPARATED: Regex = Regex::new(
        r"(?i)(?:STORE|SITE)\s*[:\-]\s*([A-Z0-9/\-_]+)"
    ).unwrap();

    // Store purchase orders
    pub static ref STORE_CODE: Regex = Regex::new(
        r"\b[A-Z]{1,4}\d{1,6}\b"
    ).unwrap();

    pub static ref STORE_CODE_LABELED: Regex = Regex::new(
        r"(STORE|OUTLET|BRANCH)\s*[:\-]?\s*([A-Z0-9\-]{3,20})"
    ).unwrap();

    pub static ref PO_DIGITS: Regex = Regex::new(
        r"\b\d{6,12}\b"
    ).unwrap();

    pub static ref INLINE_VALUE_SEPARATOR: Regex = Regex::new(
        r"[:\-]\s*"
    ).unwrap();
}
