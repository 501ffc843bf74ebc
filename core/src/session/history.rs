//! Append-only conversation log

use crate::llm::ChatMessage;

/// Ordered history of one session
///
/// Messages can only be appended. Nothing hands out mutable access to
/// entries already in the log.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    messages: Vec<ChatMessage>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously persisted history
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// The full log in append order
    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}
