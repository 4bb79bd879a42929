//! Workspace search: a query language and filtering engine for chat
//! messages and uploaded files.
//!
//! Queries combine free text, quoted phrases, `key:value` filters
//! (`from:`, `in:`, `after:`/`before:`/`during:`, `has:`, `is:`,
//! `filetype:`, `filename:`), `-` exclusions, word-level `*` wildcards,
//! and `OR` groups. Evaluation runs against pluggable datastore traits
//! with a swappable text matching backend, and listings paginate through
//! opaque base64 cursors.
//!
//! ```
//! use workspace_search::{InMemoryWorkspace, MessageRecord, SearchEngine};
//!
//! let mut workspace = InMemoryWorkspace::new();
//! workspace.add_channel("C01", "general");
//! workspace.add_message(MessageRecord {
//!     ts: "1711195200".into(),
//!     user: "U01".into(),
//!     channel: "C01".into(),
//!     text: "team deploy window".into(),
//!     ..Default::default()
//! });
//!
//! let engine = SearchEngine::new(workspace);
//! let matches = engine.search_messages("deploy in:#general")?;
//! assert_eq!(matches.len(), 1);
//! # Ok::<(), workspace_search::SearchError>(())
//! ```

pub mod error;
pub mod page;
pub mod query;
pub mod search;
pub mod store;
pub mod types;

pub use error::{Result, SearchError};
pub use page::{Cursor, Page};
pub use query::{Query, SubstringMatcher, TextMatcher};
pub use search::SearchEngine;
pub use store::{ChannelDirectory, FileStore, InMemoryWorkspace, MessageStore};
pub use types::{
    ChannelInfo, FileRecord, MessageRecord, Reaction, SearchMatches, Timestamp, UserRecord,
};
