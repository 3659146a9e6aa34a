use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The credential was rejected by the service.
    Unauthorized,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// The service answered with something that is not a completion.
    InvalidResponse,
    /// The service could not be reached.
    Network,
    /// Any other errors.
    Other,
}
