//! Query evaluation over message and file candidates.
//!
//! A candidate matches the query when it matches any OR-group; it matches a
//! group when every filter holds, every free term occurs in its text, and no
//! excluded term occurs. Filters that only make sense for the other record
//! kind hold vacuously, so a mixed query like `has:star filetype:pdf` still
//! returns starred messages alongside matching files.

use crate::types::{FileRecord, MessageRecord};

use super::expression::{FieldFilter, HasTarget, IsTarget, Query, QueryGroup, Term};
use super::text_index::{term_matches, TextMatcher};
use super::wildcard::WildcardPattern;

/// A message joined with the display name of its channel, when known.
#[derive(Debug, Clone, Copy)]
pub struct MessageCandidate<'a> {
    pub record: &'a MessageRecord,
    pub channel_name: Option<&'a str>,
}

/// A file joined with the display names of the channels it is shared into.
#[derive(Debug, Clone)]
pub struct FileCandidate<'a> {
    pub record: &'a FileRecord,
    pub channel_names: Vec<String>,
}

pub fn message_matches(
    query: &Query,
    candidate: &MessageCandidate<'_>,
    matcher: &dyn TextMatcher,
) -> bool {
    query
        .groups
        .iter()
        .any(|group| message_matches_group(group, candidate, matcher))
}

pub fn file_matches(
    query: &Query,
    candidate: &FileCandidate<'_>,
    matcher: &dyn TextMatcher,
) -> bool {
    query
        .groups
        .iter()
        .any(|group| file_matches_group(group, candidate, matcher))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

fn message_matches_group(
    group: &QueryGroup,
    candidate: &MessageCandidate<'_>,
    matcher: &dyn TextMatcher,
) -> bool {
    let text = candidate.record.text.as_str();
    group
        .filters
        .iter()
        .all(|filter| message_filter_holds(filter, candidate))
        && group
            .terms
            .iter()
            .all(|term| term_in_text(term, text, matcher))
        && !group
            .excluded
            .iter()
            .any(|term| term_in_text(term, text, matcher))
}

fn message_filter_holds(filter: &FieldFilter, candidate: &MessageCandidate<'_>) -> bool {
    let record = candidate.record;
    match filter {
        FieldFilter::From(user) => record.user == *user,
        FieldFilter::InChannel(wanted) => {
            channel_matches(wanted, &record.channel, candidate.channel_name)
        }
        FieldFilter::After(range) => record.ts_seconds().is_some_and(|ts| ts >= range.start),
        FieldFilter::Before(range) => record.ts_seconds().is_some_and(|ts| ts < range.start),
        FieldFilter::During(range) => record.ts_seconds().is_some_and(|ts| range.contains(ts)),
        FieldFilter::Has(HasTarget::Link) => {
            !record.links.is_empty() || text_contains_url(&record.text)
        }
        FieldFilter::Has(HasTarget::Reaction) => !record.reactions.is_empty(),
        FieldFilter::Has(HasTarget::Star) => record.is_starred,
        // File-only filters hold vacuously for messages.
        FieldFilter::Is(_) | FieldFilter::FileType(_) | FieldFilter::FileName(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn file_matches_group(
    group: &QueryGroup,
    candidate: &FileCandidate<'_>,
    matcher: &dyn TextMatcher,
) -> bool {
    group
        .filters
        .iter()
        .all(|filter| file_filter_holds(filter, candidate))
        && group
            .terms
            .iter()
            .all(|term| term_in_file_text(term, candidate.record, matcher))
        && !group
            .excluded
            .iter()
            .any(|term| term_in_file_text(term, candidate.record, matcher))
}

fn file_filter_holds(filter: &FieldFilter, candidate: &FileCandidate<'_>) -> bool {
    let record = candidate.record;
    match filter {
        FieldFilter::From(user) => record.user == *user,
        FieldFilter::InChannel(wanted) => {
            record.channels.iter().any(|id| id == wanted)
                || candidate
                    .channel_names
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(wanted))
        }
        FieldFilter::After(range) => record.created_seconds().is_some_and(|ts| ts >= range.start),
        FieldFilter::Before(range) => record.created_seconds().is_some_and(|ts| ts < range.start),
        FieldFilter::During(range) => record.created_seconds().is_some_and(|ts| range.contains(ts)),
        // Message-only filters hold vacuously for files.
        FieldFilter::Has(HasTarget::Link) | FieldFilter::Has(HasTarget::Reaction) => true,
        FieldFilter::Has(HasTarget::Star) => record.is_starred,
        FieldFilter::Is(IsTarget::Pinned) => record.is_pinned,
        FieldFilter::Is(IsTarget::Saved) => record.is_saved,
        FieldFilter::FileType(wanted) => record.filetype.eq_ignore_ascii_case(wanted),
        FieldFilter::FileName(wanted) => {
            super::text_index::substring_match(wanted, &record.name)
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn channel_matches(wanted: &str, id: &str, name: Option<&str>) -> bool {
    name.is_some_and(|name| name.eq_ignore_ascii_case(wanted)) || id == wanted
}

fn term_in_text(term: &Term, text: &str, matcher: &dyn TextMatcher) -> bool {
    if term.wildcard {
        WildcardPattern::compile(&term.text).matches_text(text)
    } else {
        term_matches(matcher, &term.text, text)
    }
}

/// Free terms match a file when they occur in its name or title.
fn term_in_file_text(term: &Term, record: &FileRecord, matcher: &dyn TextMatcher) -> bool {
    term_in_text(term, &record.name, matcher) || term_in_text(term, &record.title, matcher)
}

const KNOWN_TLDS: &[&str] = &["com", "org", "net", "io", "dev", "edu", "gov"];

/// Heuristic URL detection for `has:link` on messages without a `links` list.
fn text_contains_url(text: &str) -> bool {
    text.split_whitespace().any(|token| {
        if token.starts_with("http://")
            || token.starts_with("https://")
            || token.starts_with("ftp://")
            || token.starts_with("www.")
        {
            return true;
        }
        let trimmed = token.trim_matches(|ch: char| !ch.is_alphanumeric());
        let labels = trimmed.split('.').collect::<Vec<_>>();
        labels.len() >= 2
            && labels.iter().all(|label| {
                !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            })
            && labels
                .last()
                .is_some_and(|tld| KNOWN_TLDS.contains(&tld.to_lowercase().as_str()))
    })
}
