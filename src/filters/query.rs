use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::models::Highlighted;

/// A free-text search query: trimmed, matched literally and case-insensitively
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    text: String,
    pattern: Option<Regex>,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();
        if text.is_empty() {
            return Self::default();
        }

        // Escaped, so the query is a literal; only the compiled-size limit can fail
        let pattern = match RegexBuilder::new(&regex::escape(&text)).case_insensitive(true).build()
        {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(error = %e, "Search query too large to compile, nothing will match");
                None
            }
        };

        Self { text, pattern }
    }

    /// The trimmed query text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the trimmed query is empty (no filtering)
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(haystack))
    }

    /// Byte ranges of every non-overlapping occurrence, left to right
    pub fn find_matches(&self, haystack: &str) -> Vec<Range<usize>> {
        match &self.pattern {
            Some(pattern) => pattern.find_iter(haystack).map(|m| m.range()).collect(),
            None => Vec::new(),
        }
    }

    /// `text` with every occurrence of the query marked
    pub fn highlight(&self, text: &str) -> Highlighted {
        Highlighted::with_matches(text.to_string(), self.find_matches(text))
    }
}

impl PartialEq for SearchQuery {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for SearchQuery {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::new("  World \t");
        assert_eq!(query.text(), "World");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        assert!(SearchQuery::new("   ").is_empty());
        assert!(SearchQuery::new("").is_empty());
        assert!(!SearchQuery::new("").is_match("anything"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let query = SearchQuery::new("World");
        assert!(query.is_match("hello world"));
        assert!(query.is_match("HELLO WORLD"));
        assert!(!query.is_match("hello word"));
    }

    #[test]
    fn test_find_matches_non_overlapping() {
        let query = SearchQuery::new("aa");
        assert_eq!(query.find_matches("aaaa"), vec![0..2, 2..4]);
        assert_eq!(query.find_matches("aaa"), vec![0..2]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let query = SearchQuery::new("a.b(");
        assert!(query.is_match("x a.b( y"));
        assert!(!query.is_match("axb("));

        let star = SearchQuery::new("*");
        assert_eq!(star.find_matches("a*b*"), vec![1..2, 3..4]);
    }

    #[test]
    fn test_highlight_preserves_case() {
        let query = SearchQuery::new("rust");
        let text = query.highlight("Rust is RUST");
        assert_eq!(text.to_string(), "<mark>Rust</mark> is <mark>RUST</mark>");
        assert_eq!(text.as_str(), "Rust is RUST");
    }

    #[test]
    fn test_highlight_unicode() {
        let query = SearchQuery::new("世界");
        assert_eq!(query.highlight("你好世界!").to_string(), "你好<mark>世界</mark>!");

        let query = SearchQuery::new("ÉTÉ");
        assert_eq!(query.highlight("un été chaud").to_string(), "un <mark>été</mark> chaud");
    }

    #[test]
    fn test_equality_uses_trimmed_text() {
        assert_eq!(SearchQuery::new(" a "), SearchQuery::new("a"));
        assert_ne!(SearchQuery::new("a"), SearchQuery::new("A"));
    }
}
