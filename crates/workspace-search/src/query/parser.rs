//! Query tokenizer and classifier.

use crate::error::{Result, SearchError};

use super::date_range::DateRange;
use super::expression::{FieldFilter, HasTarget, IsTarget, Query, QueryGroup, Term};

impl Query {
    /// Parses a raw query string into OR-groups of filters and terms.
    ///
    /// Fails with [`SearchError::EmptyQuery`] for empty/whitespace-only
    /// input and [`SearchError::InvalidDateFormat`] for malformed
    /// `after:`/`before:`/`during:` values.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let tokens = tokenize(raw)?;

        // OR-groups are split eagerly, before any filter/term classification.
        // Only an unquoted, exact-case standalone `OR` separates groups; a
        // quoted "OR" is an ordinary term.
        let mut token_groups: Vec<Vec<RawToken>> = Vec::new();
        let mut current: Vec<RawToken> = Vec::new();
        for token in tokens {
            if token.is_or_separator() {
                if !current.is_empty() {
                    token_groups.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(token);
        }
        if !current.is_empty() {
            token_groups.push(current);
        }
        if token_groups.is_empty() {
            return Err(SearchError::QueryParse(
                "query must contain at least one term".to_string(),
            ));
        }

        let groups = token_groups
            .into_iter()
            .map(classify_group)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { groups })
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct RawToken {
    text: String,
    quoted: bool,
    negated: bool,
}

impl RawToken {
    fn is_or_separator(&self) -> bool {
        !self.quoted && !self.negated && self.text == "OR"
    }
}

/// Splits the input on whitespace, honoring double-quoted phrases and the
/// `-` exclusion prefix.
fn tokenize(input: &str) -> Result<Vec<RawToken>> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    while cursor < input.len() {
        let ch = input[cursor..].chars().next().expect("cursor checked");
        if ch.is_whitespace() {
            cursor += ch.len_utf8();
            continue;
        }

        // A `-` directly followed by a non-space token marks an exclusion;
        // a lone `-` is an ordinary term.
        let mut negated = false;
        let mut start = cursor;
        if ch == '-' {
            let next = input[cursor + 1..].chars().next();
            if matches!(next, Some(c) if !c.is_whitespace()) {
                negated = true;
                start = cursor + 1;
            }
        }

        if input[start..].starts_with('"') {
            let (phrase, next_cursor) = consume_quoted_phrase(input, start)?;
            tokens.push(RawToken {
                text: phrase,
                quoted: true,
                negated,
            });
            cursor = next_cursor;
            continue;
        }

        let mut end = start;
        while end < input.len() {
            let next = input[end..].chars().next().expect("end checked");
            if next.is_whitespace() {
                break;
            }
            end += next.len_utf8();
        }
        tokens.push(RawToken {
            text: input[start..end].to_string(),
            quoted: false,
            negated,
        });
        cursor = end;
    }

    Ok(tokens)
}

fn consume_quoted_phrase(input: &str, start: usize) -> Result<(String, usize)> {
    let mut cursor = start + 1;
    let mut phrase = String::new();
    let mut escaped = false;

    while cursor < input.len() {
        let ch = input[cursor..].chars().next().expect("cursor checked");
        cursor += ch.len_utf8();

        if escaped {
            phrase.push(ch);
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == '"' {
            return Ok((phrase, cursor));
        }

        phrase.push(ch);
    }

    Err(SearchError::QueryParse(format!(
        "missing closing quote near byte {start}"
    )))
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

fn classify_group(tokens: Vec<RawToken>) -> Result<QueryGroup> {
    let mut group = QueryGroup::default();

    for token in tokens {
        if token.negated {
            // Exclusion negates free text and tag-style filters, never
            // structure; the remainder is kept verbatim as an excluded term.
            group.excluded.push(term_from(&token));
            continue;
        }
        if token.quoted {
            group.terms.push(Term::plain(token.text));
            continue;
        }
        match classify_filter(&token.text)? {
            Some(filter) => group.filters.push(filter),
            None => group.terms.push(Term::classify(token.text)),
        }
    }

    Ok(group)
}

fn term_from(token: &RawToken) -> Term {
    if token.quoted {
        Term::plain(token.text.clone())
    } else {
        Term::classify(token.text.clone())
    }
}

/// Recognizes `key:value` filter tokens.
///
/// Returns `Ok(None)` for tokens that fall back to free text: unknown keys,
/// unknown `has:`/`is:` values, and tokens without a non-empty value. Keys
/// are case-sensitive; name-like values are compared case-insensitively
/// later, at evaluation time.
fn classify_filter(raw: &str) -> Result<Option<FieldFilter>> {
    let Some(split) = raw.find(':') else {
        return Ok(None);
    };
    if split == 0 || split + 1 >= raw.len() {
        return Ok(None);
    }
    let key = &raw[..split];
    if !key.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Ok(None);
    }
    let value = &raw[split + 1..];

    let filter = match key {
        "from" => FieldFilter::From(value.strip_prefix('@').unwrap_or(value).to_string()),
        "in" => FieldFilter::InChannel(value.strip_prefix('#').unwrap_or(value).to_string()),
        "after" => FieldFilter::After(DateRange::resolve("after", value)?),
        "before" => FieldFilter::Before(DateRange::resolve("before", value)?),
        "during" => FieldFilter::During(DateRange::resolve("during", value)?),
        "has" => match value {
            "link" => FieldFilter::Has(HasTarget::Link),
            "reaction" => FieldFilter::Has(HasTarget::Reaction),
            "star" => FieldFilter::Has(HasTarget::Star),
            _ => return Ok(None),
        },
        "is" => match value {
            "pinned" => FieldFilter::Is(IsTarget::Pinned),
            "saved" => FieldFilter::Is(IsTarget::Saved),
            _ => return Ok(None),
        },
        "type" | "filetype" => FieldFilter::FileType(value.to_string()),
        "filename" => FieldFilter::FileName(value.to_string()),
        _ => return Ok(None),
    };
    Ok(Some(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_group(query: &str) -> QueryGroup {
        let parsed = Query::parse(query).expect("parse");
        assert_eq!(parsed.groups.len(), 1);
        parsed.groups.into_iter().next().unwrap()
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(Query::parse(""), Err(SearchError::EmptyQuery)));
        assert!(matches!(Query::parse("   "), Err(SearchError::EmptyQuery)));
    }

    #[test]
    fn bare_or_has_no_terms() {
        assert!(matches!(
            Query::parse("OR"),
            Err(SearchError::QueryParse(_))
        ));
    }

    #[test]
    fn plain_terms_are_free_text() {
        let group = single_group("team meeting");
        assert!(group.filters.is_empty());
        assert_eq!(group.terms, vec![Term::plain("team"), Term::plain("meeting")]);
    }

    #[test]
    fn quoted_phrase_is_one_term() {
        let group = single_group(r#""weekly sync" notes"#);
        assert_eq!(
            group.terms,
            vec![Term::plain("weekly sync"), Term::plain("notes")]
        );
    }

    #[test]
    fn from_filter_strips_mention_sigil() {
        let group = single_group("from:@U01 hello");
        assert!(
            matches!(group.filters.as_slice(), [FieldFilter::From(user)] if user == "U01")
        );
        assert_eq!(group.terms, vec![Term::plain("hello")]);
    }

    #[test]
    fn in_filter_strips_channel_sigil() {
        let group = single_group("in:#general");
        assert!(
            matches!(group.filters.as_slice(), [FieldFilter::InChannel(ch)] if ch == "general")
        );
    }

    #[test]
    fn type_and_filetype_are_synonyms() {
        for query in ["type:pdf", "filetype:pdf"] {
            let group = single_group(query);
            assert!(
                matches!(group.filters.as_slice(), [FieldFilter::FileType(ft)] if ft == "pdf"),
                "{query} should produce a filetype filter"
            );
        }
    }

    #[test]
    fn date_filters_resolve_eagerly() {
        let group = single_group("during:2024-03");
        assert!(matches!(
            group.filters.as_slice(),
            [FieldFilter::During(_)]
        ));
    }

    #[test]
    fn invalid_date_fails_fast() {
        let error = Query::parse("hello before:garbage").unwrap_err();
        assert!(matches!(
            error,
            SearchError::InvalidDateFormat { ref key, ref value }
                if key == "before" && value == "garbage"
        ));
    }

    #[test]
    fn unknown_key_falls_back_to_free_text() {
        let group = single_group("re:greeting");
        assert!(group.filters.is_empty());
        assert_eq!(group.terms, vec![Term::plain("re:greeting")]);
    }

    #[test]
    fn unknown_has_value_falls_back_to_free_text() {
        let group = single_group("has:attachment");
        assert!(group.filters.is_empty());
        assert_eq!(group.terms, vec![Term::plain("has:attachment")]);
    }

    #[test]
    fn empty_filter_value_falls_back_to_free_text() {
        let group = single_group("from:");
        assert!(group.filters.is_empty());
        assert_eq!(group.terms, vec![Term::plain("from:")]);
    }

    #[test]
    fn star_token_becomes_wildcard_term() {
        let group = single_group("head*");
        assert_eq!(group.terms, vec![Term::classify("head*")]);
        assert!(group.terms[0].wildcard);
    }

    #[test]
    fn quoted_star_stays_literal() {
        let group = single_group(r#""head*""#);
        assert!(!group.terms[0].wildcard);
    }

    #[test]
    fn exclusion_prefix_fills_excluded_terms() {
        let group = single_group("team -meeting");
        assert_eq!(group.terms, vec![Term::plain("team")]);
        assert_eq!(group.excluded, vec![Term::plain("meeting")]);
    }

    #[test]
    fn excluded_tag_is_kept_verbatim() {
        let group = single_group("-from:@U01 report");
        assert_eq!(group.excluded, vec![Term::plain("from:@U01")]);
        assert_eq!(group.terms, vec![Term::plain("report")]);
    }

    #[test]
    fn or_splits_groups_eagerly() {
        let parsed = Query::parse("from:@U01 alpha OR beta").expect("parse");
        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(parsed.groups[0].filters.len(), 1);
        assert_eq!(parsed.groups[0].terms, vec![Term::plain("alpha")]);
        assert_eq!(parsed.groups[1].terms, vec![Term::plain("beta")]);
    }

    #[test]
    fn lowercase_or_is_a_plain_term() {
        let parsed = Query::parse("this or that").expect("parse");
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups[0].terms.len(), 3);
    }

    #[test]
    fn quoted_or_is_a_literal_term() {
        let parsed = Query::parse(r#"alpha "OR" beta"#).expect("parse");
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(
            parsed.groups[0].terms,
            vec![
                Term::plain("alpha"),
                Term::plain("OR"),
                Term::plain("beta")
            ]
        );
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(matches!(
            Query::parse(r#"alpha "unclosed"#),
            Err(SearchError::QueryParse(_))
        ));
    }

    #[test]
    fn lone_dash_is_a_plain_term() {
        let group = single_group("- alpha");
        assert_eq!(group.terms, vec![Term::plain("-"), Term::plain("alpha")]);
        assert!(group.excluded.is_empty());
    }
}
