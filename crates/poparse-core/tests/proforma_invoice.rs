use chrono::NaiveDate;
use poparse_core::{Cell, DocumentParser, ParseError, PoParseError, ProformaInvoiceParser, Sheet};
use pretty_assertions::assert_eq;

/// Build a sheet from (A1-style row, 1-based column, cell) entries.
fn grid(rows: usize, cols: usize, cells: Vec<(usize, usize, Cell)>) -> Sheet {
    let mut grid = vec![vec![Cell::Empty; cols]; rows];
    for (row, col, cell) in cells {
        grid[row - 1][col - 1] = cell;
    }
    Sheet::new(grid)
}

fn text(row: usize, col: usize, value: &str) -> (usize, usize, Cell) {
    (row, col, Cell::from(value))
}

fn num(row: usize, col: usize, value: f64) -> (usize, usize, Cell) {
    (row, col, Cell::Number(value))
}

/// Proforma invoice from a vendor, laid out as received.
fn reference_invoice(pi_date: Cell) -> Sheet {
    let mut cells = vec![
        text(1, 1, "PROFORMA INVOICE"),
        text(3, 1, "Vendor Co. Name"),
        text(3, 2, "UNV NEXGEN EXIM PVT. LTD."),
        text(4, 1, "Vendor Address"),
        text(4, 2, "708, 7th Floor, Palm Spring Centre, Malad West, Mumbai"),
        text(5, 1, "Vendor GSTIN"),
        text(5, 2, "27AABCU3488N1ZO"),
        text(7, 1, "Ref PO No"),
        text(7, 2, "PO01587"),
        text(8, 1, "PI No"),
        text(8, 2, "0036/Dava/2025-2026"),
        text(9, 1, "PI Date"),
        (9, 2, pi_date),
        text(12, 1, "Bill To Name"),
        text(12, 2, "DAVAINDIA HEALTH MART LTD."),
        text(13, 1, "Bill To Address"),
        text(13, 2, "Nagpur, Maharashtra – 440012"),
        text(14, 1, "Bill To GSTIN"),
        text(14, 2, "27AAHCD5973D1ZI"),
        text(17, 1, "Ship To Name"),
        text(17, 2, "DAVAINDIA HEALTH MART LTD."),
        text(18, 1, "Store ID"),
        text(18, 2, "CMHNAS1747"),
        text(19, 1, "Site Name"),
        text(19, 2, "Takali Road, Dwarka, Nashik Maharashtra"),
    ];

    let header = [
        "Sr No", "BOQ Name", "HSN Code", "Qty", "Unit", "Rate", "Total", "Tax Rate", "Total with GST",
    ];
    for (idx, label) in header.iter().enumerate() {
        cells.push(text(35, idx + 1, label));
    }

    cells.extend([
        num(36, 1, 1.0),
        text(36, 2, "GYPSUM FALSE CEILING"),
        text(36, 3, "68091100"),
        num(36, 4, 381.0),
        text(36, 5, "SQFT"),
        num(36, 6, 80.0),
        num(36, 7, 30480.0),
        num(36, 8, 5486.0),
        num(36, 9, 35966.0),
        num(37, 1, 2.0),
        text(37, 2, "INTERNAL BRANDING"),
        text(37, 3, "32091100"),
        num(37, 4, 50.0),
        text(37, 5, "SQFT"),
        num(37, 6, 500.0),
        num(37, 7, 25000.0),
        num(37, 8, 4500.0),
        num(37, 9, 29500.0),
        text(50, 1, "Subtotal"),
        num(50, 2, 55480.0),
        text(51, 1, "CGST 9%"),
        num(51, 2, 4993.20),
        text(52, 1, "SGST 9%"),
        num(52, 2, 4993.20),
        text(53, 1, "IGST"),
        num(53, 2, 0.0),
        text(55, 1, "Grand Total"),
        num(55, 2, 65466.40),
    ]);

    grid(55, 9, cells)
}

#[test]
fn test_reference_invoice_header_fields() {
    let result = ProformaInvoiceParser::new()
        .parse(&reference_invoice(Cell::from("22-10-2025")))
        .unwrap();
    let header = &result.po_details.header;

    assert_eq!(header.vendor_name, "UNV NEXGEN EXIM PVT. LTD.");
    assert_eq!(header.vendor_address, "708, 7th Floor, Palm Spring Centre, Malad West, Mumbai");
    assert_eq!(header.vendor_gstin, "27AABCU3488N1ZO");
    assert_eq!(header.client_name, "DAVAINDIA HEALTH MART LTD.");
    assert_eq!(header.client_po_number, "PO01587");
    assert_eq!(header.po_number, "PO01587");
    assert_eq!(header.pi_number, "0036/Dava/2025-2026");
    assert_eq!(header.pi_date.as_deref(), Some("2025-10-22"));
    assert_eq!(header.po_date, None);
    assert_eq!(header.bill_to_address, "Nagpur, Maharashtra – 440012");
    assert_eq!(header.bill_to_gstin, "27AAHCD5973D1ZI");
    assert_eq!(header.ship_to_address, "DAVAINDIA HEALTH MART LTD.");
    assert_eq!(header.site_name, "Takali Road, Dwarka, Nashik Maharashtra");
    assert_eq!(header.store_id, "CMHNAS1747");
}

#[test]
fn test_reference_invoice_line_items() {
    let result = ProformaInvoiceParser::new()
        .parse(&reference_invoice(Cell::from("22-10-2025")))
        .unwrap();

    assert_eq!(result.line_item_count, 2);
    assert_eq!(result.line_items.len(), 2);

    let first = &result.line_items[0];
    assert_eq!(first.sr, Some(1));
    assert_eq!(first.boq_name, "GYPSUM FALSE CEILING");
    assert_eq!(first.hsn_code, "68091100");
    assert_eq!(first.quantity, 381.0);
    assert_eq!(first.unit, "SQFT");
    assert_eq!(first.rate, 80.0);
    assert_eq!(first.taxable_amount, 30480.0);
    assert_eq!(first.total_with_gst, 35966.0);
    assert_eq!(first.gross_amount, 35966.0);

    let second = &result.line_items[1];
    assert_eq!(second.boq_name, "INTERNAL BRANDING");
    assert_eq!(second.quantity, 50.0);
    assert_eq!(second.rate, 500.0);
    assert_eq!(second.gross_amount, 29500.0);
}

#[test]
fn test_reference_invoice_summary() {
    let result = ProformaInvoiceParser::new()
        .parse(&reference_invoice(Cell::from("22-10-2025")))
        .unwrap();
    let summary = result.po_details.summary;

    assert_eq!(summary.subtotal, 55480.0);
    assert_eq!(summary.cgst, 4993.2);
    assert_eq!(summary.sgst, 4993.2);
    assert_eq!(summary.igst, 0.0);
    assert_eq!(summary.total_amount, 65466.4);
}

#[test]
fn test_date_typed_pi_date() {
    let date = NaiveDate::from_ymd_opt(2025, 10, 22)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let result = ProformaInvoiceParser::new()
        .parse(&reference_invoice(Cell::Date(date)))
        .unwrap();

    assert_eq!(result.po_details.header.pi_date.as_deref(), Some("2025-10-22"));
}

#[test]
fn test_result_json_contract() {
    let result = ProformaInvoiceParser::new()
        .parse(&reference_invoice(Cell::from("22-10-2025")))
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["line_item_count"], 2);
    assert_eq!(json["po_details"]["pi_date"], "2025-10-22");
    assert_eq!(json["po_details"]["total_amount"], 65466.4);
    assert_eq!(json["line_items"][0]["gst_amount"], 0.0);
    assert_eq!(json["line_items"][0]["gross_amount"], 35966.0);
    assert!(json.get("warnings").is_none());
}

#[test]
fn test_wrapped_description_rows() {
    let sheet = Sheet::from_rows(vec![
        vec!["Sr No", "Description", "Qty", "Rate", "Amount"],
        vec!["1", "Widget A", "10", "5", "50"],
        vec!["", "Extra detail text", "", "", ""],
        vec!["", "", "", "", ""],
        vec!["2", "Widget B", "1", "7", "7"],
        vec!["", "powder coated", "", "", ""],
        vec!["", "TOTAL", "", "", "57"],
    ]);
    let result = ProformaInvoiceParser::new().parse(&sheet).unwrap();

    assert_eq!(result.line_item_count, 2);
    assert_eq!(result.line_items[0].boq_name, "Widget A Extra detail text");
    assert_eq!(result.line_items[1].boq_name, "Widget B powder coated");
    assert_eq!(result.line_items[1].rate, 7.0);
}

#[test]
fn test_gross_amount_without_combined_column() {
    let sheet = Sheet::from_rows(vec![
        vec!["Sr No", "BOQ Name", "Qty", "Rate", "Amount", "GST Amount"],
        vec!["1", "GYPSUM FALSE CEILING", "381", "80", "30480", "5486"],
    ]);
    let result = ProformaInvoiceParser::new().parse(&sheet).unwrap();
    let item = &result.line_items[0];

    assert_eq!(item.taxable_amount, 30480.0);
    assert_eq!(item.tax_amount, 5486.0);
    assert_eq!(item.gross_amount, 35966.0);
}

#[test]
fn test_summary_from_totals_rows() {
    let sheet = Sheet::from_rows(vec![
        vec!["Sr No", "Description", "Qty", "Rate", "Amount"],
        vec!["1", "Partition", "1", "55480", "55480"],
        vec!["TOTAL", "", "", "", "55480"],
        vec!["CGST 9%", "", "", "", "4993.20"],
        vec!["SGST 9%", "", "", "", "4993.20"],
        vec!["GRAND TOTAL", "", "", "", "65466.40"],
    ]);
    let result = ProformaInvoiceParser::new().parse(&sheet).unwrap();
    let summary = result.po_details.summary;

    assert_eq!(summary.subtotal, 55480.0);
    assert_eq!(summary.cgst, 4993.2);
    assert_eq!(summary.sgst, 4993.2);
    assert_eq!(summary.igst, 0.0);
    assert_eq!(summary.total_amount, 65466.4);
}

#[test]
fn test_no_header_row_is_unparseable() {
    let sheet = Sheet::from_rows(vec![
        vec!["Vendor Co. Name", "UNV NEXGEN EXIM PVT. LTD."],
        vec!["Subtotal", "55480"],
    ]);
    let err = ProformaInvoiceParser::new().parse(&sheet).unwrap_err();

    assert!(matches!(err, PoParseError::Parse(ParseError::HeaderNotFound)));
}
