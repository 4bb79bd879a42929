#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("query must be a non-empty string")]
    EmptyQuery,

    #[error("query parse error: {0}")]
    QueryParse(String),

    #[error(
        "invalid date for `{key}:` filter: {value:?} (expected YYYY-MM-DD, YYYY-MM, or YYYY)"
    )]
    InvalidDateFormat { key: String, value: String },

    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
