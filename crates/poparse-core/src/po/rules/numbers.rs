//! Numeric normalization of cell text.

/// Strip thousands separators and turn accounting parentheses into a
/// leading minus.
fn normalize(text: &str) -> String {
    text.trim().replace(',', "").replace('(', "-").replace(')', "")
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether the text is a finite number once separators are removed.
pub fn is_number(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    parse_finite(&normalize(text)).is_some()
}

/// Parse a number, falling back to `0.0` for anything unparseable.
///
/// Callers cannot tell an explicit zero from a missing value.
pub fn to_float(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    parse_finite(&normalize(text)).unwrap_or(0.0)
}

/// Parse a monetary amount that may carry whitespace or a currency symbol
/// (`₹`, `$`, `£`, `€`).
pub fn parse_amount(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '₹' | '$' | '£' | '€'))
        .collect();
    if stripped.is_empty() {
        return None;
    }
    parse_finite(&normalize(&stripped))
}
