//! Lesson search request.

use serde::{Deserialize, Serialize};

/// Attributes matched as case-insensitive regular expressions.
pub const TEXT_FIELDS: [&str; 3] = ["subject", "location", "instructor"];

/// A compiled search over the lesson catalog.
///
/// A lesson matches when any text attribute contains `pattern`
/// (case-insensitive regular expression, passed through as given) or when
/// its price equals `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSearch {
    pub pattern: String,
    pub price: Option<f64>,
}

impl LessonSearch {
    /// Build a search from a raw query term.
    ///
    /// Returns `None` for an empty term, which means "list everything".
    pub fn from_term(term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }

        Some(Self {
            pattern: term.to_string(),
            price: parse_price(term),
        })
    }
}

/// Interpret the term as a number, the way a numeric coercion would:
/// surrounding whitespace is ignored, non-finite values never match.
fn parse_price(term: &str) -> Option<f64> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_means_no_filter() {
        assert!(LessonSearch::from_term("").is_none());
    }

    #[test]
    fn test_text_term_has_no_price() {
        let search = LessonSearch::from_term("math").unwrap();
        assert_eq!(search.pattern, "math");
        assert_eq!(search.price, None);
    }

    #[test]
    fn test_numeric_term_sets_price() {
        let search = LessonSearch::from_term("100").unwrap();
        assert_eq!(search.pattern, "100");
        assert_eq!(search.price, Some(100.0));

        let padded = LessonSearch::from_term(" 75 ").unwrap();
        assert_eq!(padded.price, Some(75.0));
    }

    #[test]
    fn test_whitespace_term_is_kept_as_pattern() {
        let search = LessonSearch::from_term(" ").unwrap();
        assert_eq!(search.pattern, " ");
        assert_eq!(search.price, None);
    }

    #[test]
    fn test_non_finite_numbers_are_ignored() {
        assert_eq!(LessonSearch::from_term("inf").unwrap().price, None);
        assert_eq!(LessonSearch::from_term("NaN").unwrap().price, None);
    }
}
