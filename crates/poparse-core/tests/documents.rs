use std::path::Path;

use poparse_core::pdf::tabulate;
use poparse_core::{
    load_document, DocumentError, DocumentParser, ParserFactory, ParserKind, PoParseConfig, PoParseError,
    ProformaInvoiceParser,
};
use pretty_assertions::assert_eq;

const PI_TEXT: &str = "\
PROFORMA INVOICE
Vendor Co. Name    UNV NEXGEN EXIM PVT. LTD.
PI No    0036/Dava/2025-2026
PI Date    22-10-2025

Sr No   BOQ Name   HSN Code   Qty   Unit   Rate   Total   Total with GST
1   GYPSUM FALSE CEILING   68091100   381   SQFT   80   30480   35966
2   INTERNAL BRANDING   32091100   50   SQFT   500   25000   29500

Subtotal   55480
CGST 9%   4993.20
SGST 9%   4993.20
Grand Total   65466.40
";

#[test]
fn test_pdf_text_parses_like_a_spreadsheet() {
    let sheet = tabulate(PI_TEXT, 2);
    let result = ProformaInvoiceParser::new().parse(&sheet).unwrap();

    assert_eq!(result.po_details.header.vendor_name, "UNV NEXGEN EXIM PVT. LTD.");
    assert_eq!(result.po_details.header.pi_number, "0036/Dava/2025-2026");
    assert_eq!(result.po_details.header.pi_date.as_deref(), Some("2025-10-22"));

    assert_eq!(result.line_item_count, 2);
    assert_eq!(result.line_items[0].boq_name, "GYPSUM FALSE CEILING");
    assert_eq!(result.line_items[0].quantity, 381.0);
    assert_eq!(result.line_items[0].gross_amount, 35966.0);
    assert_eq!(result.line_items[1].rate, 500.0);

    assert_eq!(result.po_details.summary.subtotal, 55480.0);
    assert_eq!(result.po_details.summary.cgst, 4993.2);
    assert_eq!(result.po_details.summary.total_amount, 65466.4);
}

#[test]
fn test_csv_proforma_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pi.csv");
    std::fs::write(
        &path,
        "Vendor Co. Name,UNV NEXGEN EXIM PVT. LTD.\n\
         PI No,0036/Dava/2025-2026\n\
         Sr No,BOQ Name,Qty,Unit,Rate,Total\n\
         1,GYPSUM FALSE CEILING,381,SQFT,80,\"30,480\"\n\
         ,with grid and channel framing,,,,\n\
         Grand Total,,,,,\"30,480\"\n",
    )
    .unwrap();

    let result = ParserFactory::default().parse_file(&path, 2).unwrap();

    assert_eq!(result.client_name.as_deref(), Some("Dava India"));
    assert_eq!(result.parser_type, Some(ParserKind::ProformaInvoice));
    assert_eq!(result.line_items[0].boq_name, "GYPSUM FALSE CEILING with grid and channel framing");
    assert_eq!(result.line_items[0].taxable_amount, 30480.0);
    assert_eq!(result.po_details.summary.total_amount, 30480.0);
}

#[test]
fn test_csv_store_purchase_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("po.csv");
    std::fs::write(
        &path,
        "PURCHASE ORDER,,,\n\
         PO Number,4500098765,,\n\
         Delivery To,\"Shop 4, Store BR118, Koramangala\",,\n\
         ,,,\n\
         S.No,Description,Quantity,Value\n\
         1,Fascia signage,2,\"18,000\"\n\
         2,Acrylic letters,,\"4,250.50\"\n\
         ,TOTAL,,\"22,250.50\"\n",
    )
    .unwrap();

    let result = ParserFactory::default().parse_file(&path, 1).unwrap();
    let header = &result.po_details.header;

    assert_eq!(result.parser_type, Some(ParserKind::PurchaseOrder));
    assert_eq!(header.po_number, "4500098765");
    assert_eq!(header.ship_to_address, "Shop 4, Store BR118, Koramangala");
    assert_eq!(header.store_id, "BR118");
    assert_eq!(result.line_item_count, 2);
    assert_eq!(result.line_items[0].quantity, 2.0);
    assert_eq!(result.line_items[1].quantity, 1.0);
    assert_eq!(result.line_items[1].gross_amount, 4250.5);
    assert_eq!(result.po_details.summary.total_amount, 22250.5);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_unsupported_and_missing_documents() {
    let config = PoParseConfig::default();

    let err = load_document(Path::new("notes.docx"), &config).unwrap_err();
    assert!(matches!(err, PoParseError::Document(DocumentError::UnsupportedFormat(_))));

    let err = load_document(Path::new("/nonexistent/po.csv"), &config).unwrap_err();
    assert!(matches!(err, PoParseError::Document(DocumentError::Open(_))));

    let err = load_document(Path::new("/nonexistent/po.pdf"), &config).unwrap_err();
    assert!(matches!(err, PoParseError::Io(_)));
}

#[test]
fn test_invalid_pdf_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.pdf");
    std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

    let err = load_document(&path, &PoParseConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PoParseError::Document(DocumentError::Pdf(_) | DocumentError::NoPages)
    ));
}
