//! Purchase-order / proforma-invoice data models handed to the persistence layer.

use serde::{Deserialize, Serialize};

/// The complete result of one parse call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Header fields merged with the tax summary.
    pub po_details: PoDetails,

    /// Line items in document order.
    pub line_items: Vec<LineItem>,

    /// Always equal to `line_items.len()`.
    pub line_item_count: usize,

    /// Non-fatal extraction notes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Client the document was parsed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,

    /// Display name of that client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Parser profile that produced this result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_type: Option<ParserKind>,
}

impl ParseResult {
    /// Build a result, deriving `line_item_count` from the items.
    pub fn new(po_details: PoDetails, line_items: Vec<LineItem>) -> Self {
        let line_item_count = line_items.len();
        Self {
            po_details,
            line_items,
            line_item_count,
            warnings: Vec::new(),
            client_id: None,
            client_name: None,
            parser_type: None,
        }
    }

    /// Attach extraction warnings.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Stamp client and parser metadata.
    pub fn with_client(mut self, client_id: u32, client_name: impl Into<String>, parser: ParserKind) -> Self {
        self.client_id = Some(client_id);
        self.client_name = Some(client_name.into());
        self.parser_type = Some(parser);
        self
    }
}

/// Header fields and summary totals, serialized as one flat object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoDetails {
    #[serde(flatten)]
    pub header: HeaderFields,

    #[serde(flatten)]
    pub summary: SummaryTotals,
}

/// Identifiers recovered from the label/value region above the item table.
///
/// Every field may be empty; required-field checks belong to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFields {
    pub vendor_name: String,
    pub vendor_address: String,
    pub vendor_gstin: String,
    pub client_name: String,
    pub client_po_number: String,
    pub po_number: String,
    /// ISO `YYYY-MM-DD`.
    pub po_date: Option<String>,
    pub pi_number: String,
    /// ISO `YYYY-MM-DD`.
    pub pi_date: Option<String>,
    pub bill_to_gstin: String,
    pub bill_to_address: String,
    pub ship_to_address: String,
    pub site_name: String,
    pub store_id: String,
}

/// A single header attribute, as targeted by a label rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    VendorName,
    VendorAddress,
    VendorGstin,
    ClientName,
    BillToAddress,
    BillToGstin,
    ShipToAddress,
    /// Writes both `po_number` and `client_po_number`.
    PoNumber,
    PoDate,
    PiNumber,
    PiDate,
    SiteName,
}

impl HeaderFields {
    /// Assign a raw label value to a field. Date fields take the
    /// already-normalized ISO form (or `None`).
    pub fn set(&mut self, field: HeaderField, value: &str) {
        let value = value.to_string();
        match field {
            HeaderField::VendorName => self.vendor_name = value,
            HeaderField::VendorAddress => self.vendor_address = value,
            HeaderField::VendorGstin => self.vendor_gstin = value,
            HeaderField::ClientName => self.client_name = value,
            HeaderField::BillToAddress => self.bill_to_address = value,
            HeaderField::BillToGstin => self.bill_to_gstin = value,
            HeaderField::ShipToAddress => self.ship_to_address = value,
            HeaderField::PoNumber => {
                self.client_po_number = value.clone();
                self.po_number = value;
            }
            HeaderField::PiNumber => self.pi_number = value,
            HeaderField::SiteName => self.site_name = value,
            HeaderField::PoDate => self.po_date = crate::po::rules::parse_date(&value),
            HeaderField::PiDate => self.pi_date = crate::po::rules::parse_date(&value),
        }
    }
}

/// Tax summary recovered below the item table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryTotals {
    pub subtotal: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total_amount: f64,
}

/// One row of the bill of quantities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Serial number printed on the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sr: Option<i64>,

    /// Description, joined with any wrapped continuation rows.
    pub boq_name: String,

    pub hsn_code: String,

    pub quantity: f64,

    pub unit: String,

    pub rate: f64,

    /// Pre-tax line total.
    pub taxable_amount: f64,

    /// GST charged on the line.
    #[serde(rename = "gst_amount", alias = "tax_amount")]
    pub tax_amount: f64,

    /// Explicit tax-inclusive cell value, 0.0 when the sheet has none.
    pub total_with_gst: f64,

    /// Tax-inclusive line total.
    pub gross_amount: f64,
}

/// Parser profile, as configured per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParserKind {
    /// Template-free BOQ spreadsheets with GST summary.
    #[serde(rename = "proforma_invoice")]
    ProformaInvoice,
    /// Retail store purchase orders with a single amount column.
    #[serde(rename = "po")]
    PurchaseOrder,
}

impl ParserKind {
    /// Wire name used in results and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::ProformaInvoice => "proforma_invoice",
            ParserKind::PurchaseOrder => "po",
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_count_follows_items() {
        let items = vec![LineItem::default(), LineItem::default()];
        let result = ParseResult::new(PoDetails::default(), items);
        assert_eq!(result.line_item_count, 2);
        assert_eq!(result.line_item_count, result.line_items.len());
    }

    #[test]
    fn test_po_details_serialize_flat() {
        let mut details = PoDetails::default();
        details.header.po_number = "PO01587".to_string();
        details.summary.cgst = 4993.2;

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["po_number"], "PO01587");
        assert_eq!(json["cgst"], 4993.2);
        assert!(json.get("header").is_none());
    }

    #[test]
    fn test_line_item_tax_serializes_as_gst_amount() {
        let item = LineItem {
            tax_amount: 5486.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["gst_amount"], 5486.0);

        let back: LineItem = serde_json::from_str(r#"{"tax_amount": 12.5}"#).unwrap();
        assert_eq!(back.tax_amount, 12.5);
    }

    #[test]
    fn test_set_po_number_fills_client_po_number() {
        let mut header = HeaderFields::default();
        header.set(HeaderField::PoNumber, "PO01587");
        assert_eq!(header.po_number, "PO01587");
        assert_eq!(header.client_po_number, "PO01587");
    }

    #[test]
    fn test_set_date_normalizes() {
        let mut header = HeaderFields::default();
        header.set(HeaderField::PiDate, "22-10-2025");
        header.set(HeaderField::PoDate, "sometime");
        assert_eq!(header.pi_date.as_deref(), Some("2025-10-22"));
        assert_eq!(header.po_date, None);
    }

    #[test]
    fn test_parser_kind_wire_names() {
        assert_eq!(serde_json::to_string(&ParserKind::PurchaseOrder).unwrap(), "\"po\"");
        assert_eq!(ParserKind::ProformaInvoice.to_string(), "proforma_invoice");
    }
}
