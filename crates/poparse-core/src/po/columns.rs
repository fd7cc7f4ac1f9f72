//! Header-row column classification.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use super::rules::{classify, is_number, KeywordRule};
use crate::document::Sheet;
use crate::models::config::ScanConfig;

/// Semantic role of an item-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRole {
    Serial,
    Description,
    Hsn,
    Quantity,
    Unit,
    Rate,
    TotalWithGst,
    Total,
    TaxAmount,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Serial => "sr",
            ColumnRole::Description => "desc",
            ColumnRole::Hsn => "hsn",
            ColumnRole::Quantity => "qty",
            ColumnRole::Unit => "unit",
            ColumnRole::Rate => "rate",
            ColumnRole::TotalWithGst => "total_with_gst",
            ColumnRole::Total => "total",
            ColumnRole::TaxAmount => "tax_amount",
        }
    }
}

/// Header keyword precedence; a column takes the role of the first rule it
/// matches.
static COLUMN_RULES: &[KeywordRule<ColumnRole>] = &[
    KeywordRule { all_of: &[&["SR", "SL", "NO."]], none_of: &["GST"], outcome: ColumnRole::Serial },
    KeywordRule {
        all_of: &[&["BOQ", "DESC", "NAME", "PARTICULARS", "ITEM", "PRODUCT", "DESCRIPTION"]],
        none_of: &[],
        outcome: ColumnRole::Description,
    },
    KeywordRule { all_of: &[&["HSN"]], none_of: &[], outcome: ColumnRole::Hsn },
    KeywordRule { all_of: &[&["QTY", "QUAN"]], none_of: &[], outcome: ColumnRole::Quantity },
    KeywordRule { all_of: &[&["UNIT"]], none_of: &["PRICE"], outcome: ColumnRole::Unit },
    KeywordRule { all_of: &[&["RATE", "PRICE"]], none_of: &["TOTAL"], outcome: ColumnRole::Rate },
    KeywordRule { all_of: &[&["TOTAL WITH"]], none_of: &[], outcome: ColumnRole::TotalWithGst },
    KeywordRule { all_of: &[&["TOTAL"], &["GST"]], none_of: &[], outcome: ColumnRole::TotalWithGst },
    KeywordRule {
        all_of: &[&["TOTAL", "AMOUNT", "VALUE", "NET"]],
        none_of: &["WITH", "GST", "TAX"],
        outcome: ColumnRole::Total,
    },
    KeywordRule { all_of: &[&["GST", "TAX"]], none_of: &["TOTAL", "RATE"], outcome: ColumnRole::TaxAmount },
];

/// Roles inferred from numeric density when no header keyword claims them.
const NUMERIC_ROLES: [ColumnRole; 3] = [ColumnRole::Quantity, ColumnRole::Rate, ColumnRole::Total];

/// Classify one upper-cased header cell.
pub fn classify_header(text: &str) -> Option<ColumnRole> {
    classify(COLUMN_RULES, text)
}

/// Role to 1-based column assignment. Each role is held by at most one
/// column and each column holds at most one role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<ColumnRole, usize>,
}

impl ColumnMap {
    /// Column holding a role.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    pub fn contains(&self, role: ColumnRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// Whether some role is already held by `col`.
    pub fn holds_column(&self, col: usize) -> bool {
        self.columns.values().any(|c| *c == col)
    }

    /// Assign a role unless it is already held. Returns whether it was taken.
    pub fn claim(&mut self, role: ColumnRole, col: usize) -> bool {
        if self.contains(role) || self.holds_column(col) {
            return false;
        }
        self.columns.insert(role, col);
        true
    }

    /// Value of a role's cell in a row of direct values; empty when the role
    /// is unmapped.
    pub fn value<'a>(&self, role: ColumnRole, row: &'a [String]) -> &'a str {
        self.get(role)
            .and_then(|col| row.get(col - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for ColumnMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .columns
            .iter()
            .map(|(role, col)| format!("{}={}", role.as_str(), col))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Map header-row columns to roles, inferring missing quantity, rate and
/// total columns from numeric density below the header.
pub fn map_columns(sheet: &Sheet, header_row: usize, scan: &ScanConfig) -> ColumnMap {
    let mut map = ColumnMap::default();

    for col in 1..=sheet.max_column() {
        let text = sheet.cell(header_row, col).to_uppercase();
        let Some(role) = classify_header(&text) else {
            continue;
        };
        if !map.claim(role, col) {
            trace!("Column {} ({:?}) left unmapped, {} already held", col, text, role.as_str());
        }
    }

    let missing: Vec<ColumnRole> = NUMERIC_ROLES
        .iter()
        .copied()
        .filter(|role| !map.contains(*role))
        .collect();

    if !missing.is_empty() {
        infer_numeric_columns(sheet, header_row, scan.column_sample_rows, &missing, &mut map);
    }

    debug!("Detected columns: {}", map);
    map
}

fn infer_numeric_columns(
    sheet: &Sheet,
    header_row: usize,
    sample_rows: usize,
    missing: &[ColumnRole],
    map: &mut ColumnMap,
) {
    let last_row = sheet.max_row().min(header_row + sample_rows);
    let mut counts: Vec<(usize, usize)> = (1..=sheet.max_column())
        .map(|col| {
            let count = (header_row + 1..=last_row)
                .filter(|row| is_number(&sheet.value(*row, col)))
                .count();
            (col, count)
        })
        .collect();

    // Stable, so equal counts keep column order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    for role in missing {
        let candidate = counts
            .iter()
            .take_while(|(_, count)| *count > 0)
            .find(|(col, _)| !map.holds_column(*col));
        if let Some((col, count)) = candidate {
            debug!("Inferred {} column {} from {} numeric cells", role.as_str(), col, count);
            map.claim(*role, *col);
        }
    }
}
