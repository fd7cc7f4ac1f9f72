//! Date normalization for label values.

/// Parse `DD-MM-YYYY` or `DD/MM/YYYY` into ISO `YYYY-MM-DD`.
///
/// Non-digit characters inside each part are ignored. Anything else,
/// including an out-of-range day or month, yields `None`.
pub fn parse_date(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let dashes = text.matches('-').count();
    let slashes = text.matches('/').count();
    if dashes != 2 && slashes != 2 {
        return None;
    }

    let separator = if text.contains('-') { '-' } else { '/' };
    let parts: Vec<&str> = text.split(separator).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = digits(day)?;
    let month = digits(month)?;
    let year = digits(year)?;

    if (1..=31).contains(&day) && (1..=12).contains(&month) {
        Some(format!("{:04}-{:02}-{:02}", year, month, day))
    } else {
        None
    }
}

/// Integer value of the digits in `part`; no digits counts as zero.
fn digits(part: &str) -> Option<u32> {
    let digits: String = part.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_and_slash_dates() {
        assert_eq!(parse_date("22-10-2025").as_deref(), Some("2025-10-22"));
        assert_eq!(parse_date("22/10/2025").as_deref(), Some("2025-10-22"));
        assert_eq!(parse_date(" 5/3/2024 ").as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_noise_inside_parts_is_ignored() {
        assert_eq!(parse_date("Dt.22-10-2025").as_deref(), Some("2025-10-22"));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-10-22 10:00"), None);
        assert_eq!(parse_date("32-10-2025"), None);
        assert_eq!(parse_date("22-13-2025"), None);
        assert_eq!(parse_date("22.10.2025"), None);
    }
}
