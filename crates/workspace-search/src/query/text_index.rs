//! Pluggable text matching backend.
//!
//! The engine asks the configured [`TextMatcher`] whether a literal term
//! occurs in a piece of record text. A backend may decline (index not built,
//! record not covered) by returning `None`, in which case the engine falls
//! back to plain case-insensitive substring matching so results never
//! silently drop to empty.

/// A text search backend consulted for literal (non-wildcard) terms.
pub trait TextMatcher {
    /// Whether `term` occurs in `haystack`.
    ///
    /// `None` means the backend cannot answer for this input and the caller
    /// should fall back to substring matching.
    fn is_match(&self, term: &str, haystack: &str) -> Option<bool>;
}

/// The default backend: case-insensitive substring containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl TextMatcher for SubstringMatcher {
    fn is_match(&self, term: &str, haystack: &str) -> Option<bool> {
        Some(substring_match(term, haystack))
    }
}

pub(crate) fn substring_match(term: &str, haystack: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

/// Resolves a literal term through the backend, with substring fallback.
pub(crate) fn term_matches(matcher: &dyn TextMatcher, term: &str, haystack: &str) -> bool {
    matcher
        .is_match(term, haystack)
        .unwrap_or_else(|| substring_match(term, haystack))
}
