//! Word-level wildcard matching for `*`-bearing query terms.

/// A compiled wildcard pattern.
///
/// Matching is word-level, never substring-level: the pattern is applied
/// independently to each alphanumeric token of the record text, so `head*`
/// matches "heading" but not "ahead". Patterns carry at most a leading and a
/// trailing `*`.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    kind: WildcardKind,
}

#[derive(Debug, Clone)]
enum WildcardKind {
    /// `head*`
    Prefix(String),
    /// `*tail`
    Suffix(String),
    /// `pre*post` — both ends, non-overlapping.
    Circumfix { head: String, tail: String },
    /// `*mid*`
    Contains(String),
    /// No `*` at all.
    Exact(String),
}

impl WildcardPattern {
    /// Compiles a pattern, lowercased for case-insensitive matching.
    pub fn compile(pattern: &str) -> Self {
        let lowered = pattern.to_lowercase();
        let kind = if let Some(inner) = lowered
            .strip_prefix('*')
            .and_then(|rest| rest.strip_suffix('*'))
        {
            WildcardKind::Contains(inner.to_string())
        } else if let Some(tail) = lowered.strip_prefix('*') {
            WildcardKind::Suffix(tail.to_string())
        } else if let Some(head) = lowered.strip_suffix('*') {
            WildcardKind::Prefix(head.to_string())
        } else if let Some(split) = lowered.find('*') {
            let rest_start = lowered.rfind('*').expect("found above") + 1;
            WildcardKind::Circumfix {
                head: lowered[..split].to_string(),
                tail: lowered[rest_start..].to_string(),
            }
        } else {
            WildcardKind::Exact(lowered)
        };
        Self { kind }
    }

    /// Case-insensitive match against a single word.
    pub fn matches_word(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        match &self.kind {
            WildcardKind::Prefix(head) => word.starts_with(head.as_str()),
            WildcardKind::Suffix(tail) => word.ends_with(tail.as_str()),
            WildcardKind::Circumfix { head, tail } => {
                word.len() >= head.len() + tail.len()
                    && word.starts_with(head.as_str())
                    && word.ends_with(tail.as_str())
            }
            WildcardKind::Contains(mid) => word.contains(mid.as_str()),
            WildcardKind::Exact(value) => word == *value,
        }
    }

    /// True when any alphanumeric token of `text` matches.
    pub fn matches_text(&self, text: &str) -> bool {
        split_words(text).any(|word| self.matches_word(word))
    }
}

/// Splits record text on whitespace/punctuation into alphanumeric tokens.
pub(crate) fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
}
