use crate::core::message::Message;

/// The ordered transcript. Insertion order is chronological order, and
/// `append` is the only mutator.
#[derive(Debug, Default, Clone)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view for rendering.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Owned copy for handing to another task.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
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
}
