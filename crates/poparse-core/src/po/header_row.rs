//! Line-item header row detection.

use tracing::{debug, trace};

use super::rules::patterns::{
    HEADER_DESCRIPTION, HEADER_QUANTITY, HEADER_RATE, HEADER_SERIAL, HEADER_SERIAL_LEADING,
};
use crate::document::Sheet;
use crate::error::ParseError;

/// Whether upper-cased row text carries the serial, description and
/// quantity/rate markers together.
pub fn is_header_text(text: &str) -> bool {
    (HEADER_SERIAL.is_match(text) || HEADER_SERIAL_LEADING.is_match(text))
        && HEADER_DESCRIPTION.is_match(text)
        && (HEADER_QUANTITY.is_match(text) || HEADER_RATE.is_match(text))
}

/// Find the first row that qualifies as the line-item header.
pub fn find_header_row(sheet: &Sheet) -> Result<usize, ParseError> {
    for row in 1..=sheet.max_row() {
        let text = sheet.resilient_row(row).join(" ").to_uppercase();
        trace!("Row {}: {}", row, text);
        if is_header_text(&text) {
            debug!("Line-item header found at row {}", row);
            return Ok(row);
        }
    }
    Err(ParseError::HeaderNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_qualifying_row_wins() {
        let sheet = Sheet::from_rows(vec![
            vec!["PROFORMA INVOICE", "", ""],
            vec!["Sr No", "Description", "Qty"],
            vec!["Sl", "Item", "Rate"],
        ]);
        assert_eq!(find_header_row(&sheet), Ok(2));
    }

    #[test]
    fn test_all_three_markers_required() {
        let sheet = Sheet::from_rows(vec![
            vec!["Sr No", "Description", "Amount"],
            vec!["No.", "Qty", "Rate"],
        ]);
        assert_eq!(find_header_row(&sheet), Err(ParseError::HeaderNotFound));
    }

    #[test]
    fn test_markers_need_word_boundaries() {
        assert!(!is_header_text("SRNO DESCRIPTIONS QTYS"));
        assert!(is_header_text("S.NO. PARTICULARS UNIT PRICE"));
        assert!(is_header_text("1 PRODUCT QUANTITY"));
    }

    #[test]
    fn test_empty_sheet() {
        assert_eq!(find_header_row(&Sheet::default()), Err(ParseError::HeaderNotFound));
    }
}
