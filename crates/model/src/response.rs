use serde::{Deserialize, Serialize};

/// A complete reply from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Identifier the service assigned to this completion, if any.
    pub id: Option<String>,
    /// The reply text.
    pub content: String,
    /// The reason the model finished generating.
    pub finish_reason: Option<ModelFinishReason>,
    /// Token accounting reported by the service.
    pub usage: Option<ModelUsage>,
}

/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFinishReason {
    /// The model has finished generating text.
    Stop,
    /// The output was cut off by a token limit.
    Length,
    /// Any reason this crate doesn't model.
    Other,
}

/// Token usage of one request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelUsage {
    /// Tokens consumed by the input messages.
    pub prompt_tokens: u64,
    /// Tokens generated in the reply.
    pub completion_tokens: u64,
    /// Sum of the two above, as reported by the service.
    pub total_tokens: u64,
}
