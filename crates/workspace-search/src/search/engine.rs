//! The search entry points: messages, files, or both at once.

use crate::error::Result;
use crate::query::{
    file_matches, message_matches, FileCandidate, MessageCandidate, Query, SubstringMatcher,
    TextMatcher,
};
use crate::store::{ChannelDirectory, FileStore, MessageStore};
use crate::types::{FileRecord, MessageRecord, SearchMatches};

/// Evaluates search queries against a workspace datastore.
///
/// The store supplies records and channel names; the text matcher answers
/// literal-term containment, defaulting to case-insensitive substring
/// matching. Results keep the store's record order, so repeated identical
/// searches return identical lists.
pub struct SearchEngine<S, M = SubstringMatcher> {
    store: S,
    text: M,
}

impl<S> SearchEngine<S>
where
    S: MessageStore + FileStore + ChannelDirectory,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            text: SubstringMatcher,
        }
    }
}

impl<S, M> SearchEngine<S, M>
where
    S: MessageStore + FileStore + ChannelDirectory,
    M: TextMatcher,
{
    /// Builds an engine around a custom text search backend.
    pub fn with_matcher(store: S, text: M) -> Self {
        Self { store, text }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Searches messages only.
    pub fn search_messages(&self, raw_query: &str) -> Result<Vec<MessageRecord>> {
        let query = Query::parse(raw_query)?;
        let matches = self.matching_messages(&query);
        log::debug!("query {raw_query:?} matched {} message(s)", matches.len());
        Ok(matches)
    }

    /// Searches files only.
    pub fn search_files(&self, raw_query: &str) -> Result<Vec<FileRecord>> {
        let query = Query::parse(raw_query)?;
        let matches = self.matching_files(&query);
        log::debug!("query {raw_query:?} matched {} file(s)", matches.len());
        Ok(matches)
    }

    /// Searches messages and files with one parse of the query.
    pub fn search_all(&self, raw_query: &str) -> Result<SearchMatches> {
        let query = Query::parse(raw_query)?;
        let matches = SearchMatches {
            messages: self.matching_messages(&query),
            files: self.matching_files(&query),
        };
        log::debug!(
            "query {raw_query:?} matched {} message(s), {} file(s)",
            matches.messages.len(),
            matches.files.len()
        );
        Ok(matches)
    }

    fn matching_messages(&self, query: &Query) -> Vec<MessageRecord> {
        self.store
            .messages()
            .into_iter()
            .filter(|record| {
                let name = self.store.channel_name(&record.channel);
                let candidate = MessageCandidate {
                    record,
                    channel_name: name.as_deref(),
                };
                message_matches(query, &candidate, &self.text)
            })
            .collect()
    }

    fn matching_files(&self, query: &Query) -> Vec<FileRecord> {
        self.store
            .files()
            .into_iter()
            .filter(|record| {
                let channel_names = record
                    .channels
                    .iter()
                    .filter_map(|id| self.store.channel_name(id))
                    .collect();
                let candidate = FileCandidate {
                    record,
                    channel_names,
                };
                file_matches(query, &candidate, &self.text)
            })
            .collect()
    }
}
