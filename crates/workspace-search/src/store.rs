//! Datastore traits and an in-memory workspace implementation.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::page::{paginate, Page};
use crate::types::{ChannelInfo, FileRecord, MessageRecord, UserRecord};

/// Resolves channel ids to display names for `in:` filters.
pub trait ChannelDirectory {
    fn channel_name(&self, id: &str) -> Option<String>;
    fn channels(&self) -> Vec<ChannelInfo>;
}

/// Supplies the message corpus.
///
/// Messages come back in stable order: chronological within a channel,
/// channels concatenated in a fixed order. Search results preserve this
/// order, so the same query over the same corpus yields the same list.
pub trait MessageStore {
    fn messages(&self) -> Vec<MessageRecord>;
}

/// Supplies the file corpus in a stable global order, deduplicated by id.
pub trait FileStore {
    fn files(&self) -> Vec<FileRecord>;
}

const DEFAULT_PAGE_LIMIT: usize = 100;

/// An in-memory workspace: channels with their messages, plus files
/// and users.
#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    channels: BTreeMap<String, Channel>,
    files: Vec<FileRecord>,
    users: Vec<UserRecord>,
}

#[derive(Debug, Default)]
struct Channel {
    name: String,
    messages: Vec<MessageRecord>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_channel(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.channels.entry(id.into()).or_default().name = name.into();
    }

    /// Appends a message to its channel, creating the channel if needed.
    /// Insertion order within a channel is assumed chronological.
    pub fn add_message(&mut self, message: MessageRecord) {
        self.channels
            .entry(message.channel.clone())
            .or_default()
            .messages
            .push(message);
    }

    /// Adds a file, ignoring duplicates by id.
    pub fn add_file(&mut self, file: FileRecord) {
        if self.files.iter().any(|existing| existing.id == file.id) {
            return;
        }
        self.files.push(file);
    }

    pub fn add_user(&mut self, user: UserRecord) {
        self.users.push(user);
    }

    /// Lists users a page at a time, ordered by id.
    pub fn list_users(
        &self,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Page<UserRecord>> {
        let ids = self.users.iter().map(|user| user.id.clone()).collect();
        let page = paginate(
            "user",
            ids,
            cursor,
            limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )?;
        let items = page
            .items
            .iter()
            .filter_map(|id| self.users.iter().find(|user| &user.id == id).cloned())
            .collect();
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// Lists channels a page at a time, ordered by id.
    pub fn list_channels(
        &self,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Page<ChannelInfo>> {
        let ids = self.channels.keys().cloned().collect();
        let page = paginate(
            "channel",
            ids,
            cursor,
            limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )?;
        let items = page
            .items
            .iter()
            .map(|id| ChannelInfo {
                id: id.clone(),
                name: self.channels[id].name.clone(),
            })
            .collect();
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }
}

impl ChannelDirectory for InMemoryWorkspace {
    fn channel_name(&self, id: &str) -> Option<String> {
        self.channels.get(id).map(|channel| channel.name.clone())
    }

    fn channels(&self) -> Vec<ChannelInfo> {
        self.channels
            .iter()
            .map(|(id, channel)| ChannelInfo {
                id: id.clone(),
                name: channel.name.clone(),
            })
            .collect()
    }
}

impl MessageStore for InMemoryWorkspace {
    fn messages(&self) -> Vec<MessageRecord> {
        self.channels
            .values()
            .flat_map(|channel| channel.messages.iter().cloned())
            .collect()
    }
}

impl FileStore for InMemoryWorkspace {
    fn files(&self) -> Vec<FileRecord> {
        self.files.clone()
    }
}
