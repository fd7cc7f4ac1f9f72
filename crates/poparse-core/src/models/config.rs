//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};

use super::po::ParserKind;

/// Main configuration for the poparse pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoParseConfig {
    /// Scan limits for the BOQ (proforma invoice) parser.
    pub scan: ScanConfig,

    /// PDF text tabulation.
    pub pdf: PdfConfig,

    /// Scan limits for the store purchase-order parser.
    pub store_po: StorePoConfig,

    /// Client profiles used to select a parser.
    pub clients: Vec<ClientProfile>,
}

/// Scan limits for the BOQ parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How many rows upward a blank cell may borrow its value from.
    pub upward_search_rows: usize,

    /// Rows scanned for label/value header fields.
    pub header_field_rows: usize,

    /// Rows concatenated for the PO-number and store-id regex fallbacks.
    pub identifier_scan_rows: usize,

    /// Columns to the right of a label searched for its value.
    pub value_columns: usize,

    /// Rows below the header sampled for numeric column inference.
    pub column_sample_rows: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            upward_search_rows: 5,
            header_field_rows: 30,
            identifier_scan_rows: 40,
            value_columns: 3,
            column_sample_rows: 20,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as text-based.
    pub min_text_length: usize,

    /// Run of spaces that separates two cells on one text line.
    pub min_column_gap: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            min_column_gap: 2,
        }
    }
}

/// Scan limits for the store purchase-order parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePoConfig {
    /// Rows searched for the ship-to / site address.
    pub site_scan_rows: usize,

    /// Rows searched for the PO number and date.
    pub po_number_scan_rows: usize,

    /// Rows searched for the DESCRIPTION header and store codes.
    pub table_scan_rows: usize,
}

impl Default for StorePoConfig {
    fn default() -> Self {
        Self {
            site_scan_rows: 12,
            po_number_scan_rows: 50,
            table_scan_rows: 80,
        }
    }
}

/// A client and the parser its documents go through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: u32,
    pub name: String,
    pub parser: ParserKind,
}

/// Client profiles shipped by default.
pub fn default_clients() -> Vec<ClientProfile> {
    vec![
        ClientProfile {
            id: 1,
            name: "Bajaj".to_string(),
            parser: ParserKind::PurchaseOrder,
        },
        ClientProfile {
            id: 2,
            name: "Dava India".to_string(),
            parser: ParserKind::ProformaInvoice,
        },
    ]
}

impl PoParseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Configured client profiles, falling back to the defaults when none are set.
    pub fn client_profiles(&self) -> Vec<ClientProfile> {
        if self.clients.is_empty() {
            default_clients()
        } else {
            self.clients.clone()
        }
    }

    /// Look up one client profile.
    pub fn client(&self, id: u32) -> Option<ClientProfile> {
        self.client_profiles().into_iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PoParseConfig =
            serde_json::from_str(r#"{"scan": {"header_field_rows": 45}}"#).unwrap();
        assert_eq!(config.scan.header_field_rows, 45);
        assert_eq!(config.scan.upward_search_rows, 5);
        assert_eq!(config.store_po.table_scan_rows, 80);
    }

    #[test]
    fn test_default_clients() {
        let config = PoParseConfig::default();
        assert_eq!(config.client(1).map(|c| c.parser), Some(ParserKind::PurchaseOrder));
        assert_eq!(config.client(2).map(|c| c.parser), Some(ParserKind::ProformaInvoice));
        assert!(config.client(99).is_none());
    }

    #[test]
    fn test_configured_clients_replace_defaults() {
        let config: PoParseConfig = serde_json::from_str(
            r#"{"clients": [{"id": 7, "name": "Acme Retail", "parser": "po"}]}"#,
        )
        .unwrap();
        assert_eq!(config.client_profiles().len(), 1);
        assert_eq!(config.client(7).map(|c| c.name), Some("Acme Retail".to_string()));
        assert!(config.client(2).is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PoParseConfig::default();
        config.pdf.min_column_gap = 3;
        config.save(&path).unwrap();

        let loaded = PoParseConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
