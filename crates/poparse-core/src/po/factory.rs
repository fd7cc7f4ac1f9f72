//! Parser selection by client profile.

use std::path::Path;

use tracing::info;

use super::{DocumentParser, ProformaInvoiceParser, StorePoParser};
use crate::document::{load_document, Sheet};
use crate::error::{PoParseError, Result};
use crate::models::config::{ClientProfile, PoParseConfig};
use crate::models::po::{ParseResult, ParserKind};

/// Picks the parser configured for a client and runs it.
#[derive(Debug, Clone, Default)]
pub struct ParserFactory {
    config: PoParseConfig,
}

impl ParserFactory {
    /// Create a factory over a configuration.
    pub fn new(config: PoParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PoParseConfig {
        &self.config
    }

    /// Profile for a client id.
    pub fn client(&self, client_id: u32) -> Result<ClientProfile> {
        self.config
            .client(client_id)
            .ok_or_else(|| PoParseError::Config(format!("no parser configured for client_id {}", client_id)))
    }

    /// Build the parser for a profile kind.
    pub fn parser(&self, kind: ParserKind) -> Box<dyn DocumentParser + Send + Sync> {
        match kind {
            ParserKind::ProformaInvoice => {
                Box::new(ProformaInvoiceParser::new().with_scan(self.config.scan.clone()))
            }
            ParserKind::PurchaseOrder => {
                Box::new(StorePoParser::new().with_config(self.config.store_po.clone()))
            }
        }
    }

    /// Parse an already loaded sheet with a given profile.
    pub fn parse_sheet(&self, sheet: &Sheet, kind: ParserKind) -> Result<ParseResult> {
        self.parser(kind).parse(sheet)
    }

    /// Load and parse a document with a given profile.
    pub fn parse_with(&self, path: &Path, kind: ParserKind) -> Result<ParseResult> {
        let sheet = load_document(path, &self.config)?;
        self.parse_sheet(&sheet, kind)
    }

    /// Load and parse a document for a client, stamping the client and
    /// parser on the result.
    pub fn parse_file(&self, path: &Path, client_id: u32) -> Result<ParseResult> {
        let client = self.client(client_id)?;
        info!(
            "Parsing {} for client {} ({}) with {} parser",
            path.display(),
            client.id,
            client.name,
            client.parser
        );

        let result = self.parse_with(path, client.parser)?;
        Ok(result.with_client(client.id, client.name, client.parser))
    }
}
