//! # Message Log
//!
//! Append-only record of everything shown on screen, oldest first.
//!
//! ```text
//! MessageLog
//! └── entries: Vec<Message>
//!     ├── Message { text, sender: System, timestamp }   // boot banner, lifecycle
//!     ├── Message { text, sender: Local,  timestamp }   // "> " + what we sent
//!     └── Message { text, sender: Remote, timestamp }   // what the peer sent
//! ```
//!
//! Entries are never edited, reordered, deduplicated or removed.

use chrono::{DateTime, Local};

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Synthesized locally to narrate lifecycle events.
    System,
    /// Echo of a line the user sent.
    Local,
    /// Received from the peer.
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// When the entry was created. Not rendered.
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Shorthand for appending a `System` entry.
    pub fn system(&mut self, text: impl Into<String>) {
        self.append(Message::new(text, Sender::System));
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[Message] {
        &self.entries[index.min(self.entries.len())..]
    }
}
