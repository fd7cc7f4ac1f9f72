//! Value normalizers, compiled patterns and keyword rule tables shared by the
//! extractors.

pub mod dates;
pub mod numbers;
pub mod patterns;

pub use dates::parse_date;
pub use numbers::{is_number, parse_amount, to_float};

/// One entry of an ordered keyword classification table.
///
/// A rule matches upper-cased text when every group in `all_of` contributes
/// at least one substring and no substring of `none_of` occurs.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub all_of: &'static [&'static [&'static str]],
    pub none_of: &'static [&'static str],
    pub outcome: T,
}

impl<T: Copy> KeywordRule<T> {
    /// Whether upper-cased `text` satisfies this rule.
    pub fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|group| contains_any(text, group))
            && !contains_any(text, self.none_of)
    }
}

/// Outcome of the first rule in `rules` that matches `text`.
pub fn classify<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| rule.outcome)
}

/// Whether `text` contains any of `needles`.
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
