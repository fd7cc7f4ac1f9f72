//! CSV exports of vendor spreadsheets.

use std::io::Read;
use std::path::Path;

use super::{Cell, Sheet};
use crate::error::DocumentError;

/// Read a CSV file into a sheet of text cells.
pub fn read_csv(path: &Path) -> Result<Sheet, DocumentError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DocumentError::Open(format!("{e}: {}", path.display())))?;
    sheet_from_reader(file)
}

/// Read CSV data from any reader. Rows may have differing lengths and there
/// is no header record.
pub fn sheet_from_reader<R: Read>(reader: R) -> Result<Sheet, DocumentError> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    // Windows exports use the ANSI code page; undecodable bytes become U+FFFD
    let mut rows = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record.map_err(|e| DocumentError::Open(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| Cell::from_text(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }

    Ok(Sheet::new(rows))
}
