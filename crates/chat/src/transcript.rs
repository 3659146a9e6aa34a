//! Conversation history kept by the chat loop.

use llama_chat_model::{ModelMessage, ModelRequest};
use serde::{Deserialize, Serialize};

/// Who produced a [`Turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The operator typing at the prompt.
    User,
    /// The remote model.
    Assistant,
}

/// One message exchanged in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// The originator of this turn.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl Turn {
    /// Creates a turn typed by the operator.
    #[inline]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a turn produced by the model.
    #[inline]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Turn> for ModelMessage {
    fn from(turn: &Turn) -> Self {
        match turn.role {
            Role::User => ModelMessage::User(turn.content.clone()),
            Role::Assistant => ModelMessage::Assistant(turn.content.clone()),
        }
    }
}

/// The ordered history of turns, replayed in full on every request.
///
/// Turns are appended as they are produced. Alternation between user and
/// assistant is not enforced: a failed request leaves its user turn without
/// an answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Appends a turn at the end.
    #[inline]
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Returns all turns in insertion order.
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Builds a request carrying the whole transcript as context.
    pub fn to_request(&self, model: Option<String>) -> ModelRequest {
        ModelRequest {
            model,
            messages: self.turns.iter().map(ModelMessage::from).collect(),
        }
    }
}
