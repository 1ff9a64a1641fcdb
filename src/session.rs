use crate::conversation::Conversation;
use crate::models::Message;

/// State owned by one chat screen: the thread and the input field.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    input: String,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) -> &str {
        self.conversation.append(message)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Returns the current input and leaves the field empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}
