//! Record types supplied by the datastore collaborators.
//!
//! The datastore is allowed to hand over partially populated records, so
//! optional collections default to empty and timestamps parse leniently.
//! A record missing a field never panics the engine; it simply fails the
//! filters that would have read that field.

use serde::{Deserialize, Serialize};

/// A reaction attached to a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reaction {
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub count: u32,
}

/// A chat message as stored by the workspace datastore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Unix seconds as a string, fractional part allowed (`"1710500000.000200"`).
    pub ts: String,
    pub user: String,
    /// Channel id the message belongs to.
    pub channel: String,
    pub text: String,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub is_starred: bool,
}

impl MessageRecord {
    /// Parses the `ts` field into whole unix seconds.
    ///
    /// Returns `None` for malformed timestamps; date filters treat such
    /// records as non-matching.
    pub fn ts_seconds(&self) -> Option<i64> {
        parse_unix_seconds(&self.ts)
    }
}

/// Numeric-or-string unix timestamp; the datastore supplies either shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(i64),
    Fractional(f64),
    Raw(String),
}

impl Timestamp {
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(value) => Some(*value),
            Self::Fractional(value) if value.is_finite() => Some(*value as i64),
            Self::Fractional(_) => None,
            Self::Raw(raw) => parse_unix_seconds(raw),
        }
    }
}

/// An uploaded file as stored by the workspace datastore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filetype: String,
    /// Channel ids the file is shared into.
    #[serde(default)]
    pub channels: Vec<String>,
    pub user: String,
    #[serde(default)]
    pub created: Option<Timestamp>,
    /// Alternative timestamp field kept by some datastore records.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_saved: bool,
}

impl FileRecord {
    /// Effective creation time: `created` first, falling back to `timestamp`.
    pub fn created_seconds(&self) -> Option<i64> {
        self.created
            .as_ref()
            .and_then(Timestamp::as_seconds)
            .or_else(|| self.timestamp.as_ref().and_then(Timestamp::as_seconds))
    }
}

/// Combined result payload of a cross-kind search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchMatches {
    pub messages: Vec<MessageRecord>,
    pub files: Vec<FileRecord>,
}

/// Minimal user payload for paginated listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
}

/// Channel id/name pair used for listings and `in:` resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
}

fn parse_unix_seconds(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    value.is_finite().then_some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ts_seconds_accepts_fractional() {
        let record = MessageRecord {
            ts: "1710500000.000200".to_string(),
            ..Default::default()
        };
        assert_eq!(record.ts_seconds(), Some(1710500000));
    }

    #[test]
    fn ts_seconds_rejects_garbage() {
        let record = MessageRecord {
            ts: "not-a-ts".to_string(),
            ..Default::default()
        };
        assert_eq!(record.ts_seconds(), None);
    }

    #[test]
    fn file_created_prefers_created_over_timestamp() {
        let record = FileRecord {
            created: Some(Timestamp::Seconds(100)),
            timestamp: Some(Timestamp::Seconds(200)),
            ..Default::default()
        };
        assert_eq!(record.created_seconds(), Some(100));
    }

    #[test]
    fn file_created_falls_back_to_timestamp() {
        let record = FileRecord {
            created: None,
            timestamp: Some(Timestamp::Raw("200.5".to_string())),
            ..Default::default()
        };
        assert_eq!(record.created_seconds(), Some(200));
    }

    #[test]
    fn partial_record_deserializes_with_defaults() {
        let record: MessageRecord = serde_json::from_str(
            r#"{"ts": "1710500000.000100", "user": "U01", "channel": "C01", "text": "hi"}"#,
        )
        .expect("deserialize");
        assert!(record.reactions.is_empty());
        assert!(record.links.is_empty());
        assert!(!record.is_starred);
    }

    #[test]
    fn numeric_or_string_timestamp_deserializes() {
        let file: FileRecord = serde_json::from_str(
            r#"{"id": "F01", "name": "a.pdf", "user": "U01", "created": 1710500000}"#,
        )
        .expect("deserialize");
        assert_eq!(file.created_seconds(), Some(1710500000));

        let file: FileRecord = serde_json::from_str(
            r#"{"id": "F02", "name": "b.pdf", "user": "U01", "created": "1710500000"}"#,
        )
        .expect("deserialize");
        assert_eq!(file.created_seconds(), Some(1710500000));
    }
}
