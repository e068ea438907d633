//! Conversation memory shared by the HTTP transports.
//!
//! The remote APIs are stateless, so the adapter replays the whole history
//! on every request. A turn pair is committed only once the service has
//! answered with text; a failed or empty exchange leaves the history as it
//! was, so the same message can be sent again.

use sensei_types::llm::{Message, Reply};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    turns: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Drop all history and start over under a fresh id.
    pub fn restart(&mut self) {
        self.turns.clear();
        self.id = Uuid::now_v7();
        tracing::info!(conversation_id = %self.id, "new conversation");
    }

    /// The history followed by `message` as the next user turn.
    pub fn with_user_turn(&self, message: &str) -> Vec<Message> {
        let mut turns = self.turns.clone();
        turns.push(Message::user(message));
        turns
    }

    /// Append the exchange if the reply carries text.
    pub fn commit(&mut self, message: &str, reply: &Reply) {
        if let Some(text) = reply.message() {
            self.turns.push(Message::user(message));
            self.turns.push(Message::assistant(text));
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
