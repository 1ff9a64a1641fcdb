// src/conversation.rs

use crate::models::Message;
use log::warn;
use std::collections::HashSet;

/// Ordered, append-only thread of messages for one chat session.
///
/// Nothing is ever removed or edited in place, and ids stay unique: a
/// message whose id is already taken is stored under a suffixed id.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    ids: HashSet<String>,
    revision: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `message` at the end and returns the id it was stored under.
    pub fn append(&mut self, mut message: Message) -> &str {
        if self.ids.contains(&message.id) {
            let replacement = format!("{}-{}", message.id, uuid::Uuid::new_v4());
            warn!(
                "duplicate message id {:?} in conversation; stored as {:?}",
                message.id, replacement
            );
            message.id = replacement;
        }

        self.ids.insert(message.id.clone());
        self.messages.push(message);
        self.revision += 1;

        &self.messages[self.messages.len() - 1].id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Bumped on every append; the UI redraws when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
