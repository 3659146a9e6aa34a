use llama_chat_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// The preset outcome of one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// The request succeeds with this reply text.
    #[serde(rename = "reply")]
    Reply(String),
    /// The request fails with an error of this kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

impl PresetResponse {
    /// Creates a successful reply.
    #[inline]
    pub fn reply(content: impl Into<String>) -> Self {
        Self::Reply(content.into())
    }

    /// Creates a failure.
    #[inline]
    pub fn failure(kind: ErrorKind) -> Self {
        Self::Failure(kind)
    }
}
