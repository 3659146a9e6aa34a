/// A request to be sent to the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The model to use. Providers fall back to their configured model
    /// when this is `None`.
    pub model: Option<String>,
    /// The input messages, in conversation order.
    pub messages: Vec<ModelMessage>,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ModelMessage {
    /// Returns the role name of this message as used on the wire.
    #[inline]
    pub fn role(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
        }
    }

    /// Returns the text of this message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            Self::User(content) | Self::Assistant(content) => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_accessors() {
        let msg = ModelMessage::Assistant("Hi there!".to_owned());
        assert_eq!(msg.role(), "assistant");
        assert_eq!(msg.content(), "Hi there!");
    }
}
