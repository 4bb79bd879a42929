//! Query AST types.

use super::date_range::DateRange;

/// A parsed search query: one or more OR'd groups.
///
/// A record matches the query when it matches at least one group; it matches
/// a group when it satisfies every filter, every free term, and none of the
/// excluded terms.
#[derive(Debug, Clone)]
pub struct Query {
    pub groups: Vec<QueryGroup>,
}

/// One OR-group of AND'd constraints.
#[derive(Debug, Clone, Default)]
pub struct QueryGroup {
    pub filters: Vec<FieldFilter>,
    pub terms: Vec<Term>,
    pub excluded: Vec<Term>,
}

/// A free-text or wildcard term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub text: String,
    pub wildcard: bool,
}

impl Term {
    /// A literal term, regardless of embedded `*` (quoted phrases).
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wildcard: false,
        }
    }

    /// An unquoted term; `*` anywhere makes it a wildcard term.
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let wildcard = text.contains('*');
        Self { text, wildcard }
    }
}

/// Target of a `has:` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasTarget {
    Link,
    Reaction,
    Star,
}

/// Target of an `is:` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsTarget {
    Pinned,
    Saved,
}

/// A typed `key:value` constraint.
///
/// Date-bearing variants carry the range resolved at parse time, so an
/// invalid date fails the query before any record is evaluated.
#[derive(Debug, Clone)]
pub enum FieldFilter {
    /// `from:@U` — sender/uploader id, `@` already stripped.
    From(String),
    /// `in:#C` — channel name or raw id, `#` already stripped.
    InChannel(String),
    /// `after:` — keeps timestamps at or past the range start.
    After(DateRange),
    /// `before:` — keeps timestamps strictly before the range start.
    Before(DateRange),
    /// `during:` — keeps timestamps inside the range.
    During(DateRange),
    Has(HasTarget),
    Is(IsTarget),
    /// `type:` / `filetype:` — file extension, compared case-insensitively.
    FileType(String),
    /// `filename:` — case-insensitive substring of the file name.
    FileName(String),
}
