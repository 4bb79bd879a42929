//! Search query language: tokenizer, AST, date ranges, wildcards, and
//! evaluation against message/file records.

mod date_range;
mod evaluate;
mod expression;
mod parser;
mod text_index;
mod wildcard;

pub use date_range::DateRange;
pub use expression::{FieldFilter, HasTarget, IsTarget, Query, QueryGroup, Term};
pub use text_index::{SubstringMatcher, TextMatcher};
pub use wildcard::WildcardPattern;

pub(crate) use evaluate::{file_matches, message_matches, FileCandidate, MessageCandidate};
