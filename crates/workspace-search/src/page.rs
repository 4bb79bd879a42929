//! Opaque cursor pagination over stable key sets.
//!
//! Cursors encode `"{kind}:{key}"` in base64. The kind ties a cursor to the
//! listing that produced it, so a user-listing cursor handed to a channel
//! listing is rejected instead of silently resuming at the wrong place.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, SearchError};

/// A decoded pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    kind: String,
    key: String,
}

impl Cursor {
    pub fn new(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            key: key.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The sort key of the last item on the previous page.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind, self.key))
    }

    /// Decodes an opaque cursor, checking it belongs to `expected_kind`.
    pub fn decode(raw: &str, expected_kind: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(raw)
            .map_err(|_| SearchError::InvalidCursor("not valid base64".to_string()))?;
        let decoded = String::from_utf8(bytes)
            .map_err(|_| SearchError::InvalidCursor("not valid utf-8".to_string()))?;
        let Some((kind, key)) = decoded.split_once(':') else {
            return Err(SearchError::InvalidCursor(
                "missing `kind:key` separator".to_string(),
            ));
        };
        if kind != expected_kind {
            return Err(SearchError::InvalidCursor(format!(
                "cursor kind {kind:?} does not match this listing"
            )));
        }
        if key.is_empty() {
            return Err(SearchError::InvalidCursor("empty cursor key".to_string()));
        }
        Ok(Self::new(kind, key))
    }
}

/// One page of a listing, with the cursor for the next page when more
/// items remain.
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Paginates a key set deterministically.
///
/// Keys are sorted and deduplicated, so repeated calls over the same
/// underlying set walk the same order. A cursor naming a key that no longer
/// exists is rejected rather than guessed around.
pub fn paginate(
    kind: &str,
    mut keys: Vec<String>,
    cursor: Option<&str>,
    limit: usize,
) -> Result<Page<String>> {
    keys.sort_unstable();
    keys.dedup();

    let start = match cursor {
        Some(raw) => {
            let cursor = Cursor::decode(raw, kind)?;
            let index = keys
                .binary_search_by(|key| key.as_str().cmp(cursor.key()))
                .map_err(|_| {
                    SearchError::InvalidCursor(format!(
                        "cursor key {:?} not found",
                        cursor.key()
                    ))
                })?;
            index + 1
        }
        None => 0,
    };

    let end = keys.len().min(start + limit);
    let items = keys[start..end].to_vec();
    let next_cursor = if end < keys.len() {
        items.last().map(|key| Cursor::new(kind, key.clone()).encode())
    } else {
        None
    };

    Ok(Page { items, next_cursor })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn cursor_round_trips() {
        let cursor = Cursor::new("user", "U07");
        let decoded = Cursor::decode(&cursor.encode(), "user").expect("decode");
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn cursor_is_opaque_base64() {
        let encoded = Cursor::new("user", "U07").encode();
        assert!(!encoded.contains(':'));
        assert!(encoded.is_ascii());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let encoded = Cursor::new("user", "U07").encode();
        assert!(matches!(
            Cursor::decode(&encoded, "channel"),
            Err(SearchError::InvalidCursor(_))
        ));
    }

    #[test]
    fn garbage_cursors_are_rejected() {
        for raw in ["%%%", "", "aGVsbG8"] {
            assert!(Cursor::decode(raw, "user").is_err(), "{raw:?}");
        }
        // Valid base64 of "no-separator".
        let encoded = STANDARD.encode("no-separator");
        assert!(Cursor::decode(&encoded, "user").is_err());
    }

    #[test]
    fn first_page_and_next_cursor() {
        let page = paginate("user", keys(&["U03", "U01", "U02"]), None, 2).expect("page");
        assert_eq!(page.items, keys(&["U01", "U02"]));
        let next = page.next_cursor.expect("more pages");
        assert_eq!(Cursor::decode(&next, "user").unwrap().key(), "U02");
    }

    #[test]
    fn resume_walks_the_remainder() {
        let all = keys(&["U01", "U02", "U03"]);
        let first = paginate("user", all.clone(), None, 2).expect("page");
        let second = paginate("user", all, first.next_cursor.as_deref(), 2).expect("page");
        assert_eq!(second.items, keys(&["U03"]));
        assert!(second.next_cursor.is_none());
    }

    #[test]
    fn exact_fit_has_no_next_cursor() {
        let page = paginate("user", keys(&["U01", "U02"]), None, 2).expect("page");
        assert_eq!(page.items.len(), 2);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn duplicate_keys_collapse() {
        let page = paginate("user", keys(&["U01", "U01", "U02"]), None, 10).expect("page");
        assert_eq!(page.items, keys(&["U01", "U02"]));
    }

    #[test]
    fn stale_cursor_key_is_rejected() {
        let encoded = Cursor::new("user", "U99").encode();
        assert!(matches!(
            paginate("user", keys(&["U01", "U02"]), Some(&encoded), 2),
            Err(SearchError::InvalidCursor(_))
        ));
    }

    #[test]
    fn zero_limit_yields_empty_page() {
        let page = paginate("user", keys(&["U01", "U02"]), None, 0).expect("page");
        assert!(page.items.is_empty());
    }
}
