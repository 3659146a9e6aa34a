//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use llama_chat_model::{
    ErrorKind, ModelFinishReason, ModelProvider, ModelProviderError,
    ModelRequest, ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct State {
    script: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond to each request. Responses are consumed in order,
/// one per request, regardless of the request content. If the script is
/// exhausted, an error will be returned.
///
/// Every request is recorded and can be inspected with
/// [`TestModelProvider::requests`]. Clones share the same script and record.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    state: Arc<Mutex<State>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Creates a provider that answers with the given responses in order.
    pub fn with_script(
        script: impl IntoIterator<Item = PresetResponse>,
    ) -> Self {
        let provider = Self::default();
        provider.lock().script.extend(script);
        provider
    }

    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.lock().script.push_back(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns a copy of every request received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for TestModelProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TestModelProvider")
            .field("remaining", &state.script.len())
            .field("received", &state.requests.len())
            .field("delay", &self.delay)
            .finish()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let (preset, request_idx) = {
            let mut state = self.lock();
            state.requests.push(req.clone());
            (state.script.pop_front(), state.requests.len())
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match preset {
                Some(PresetResponse::Reply(content)) => Ok(ModelResponse {
                    id: Some(format!("test:{request_idx}")),
                    content,
                    finish_reason: Some(ModelFinishReason::Stop),
                    usage: None,
                }),
                Some(PresetResponse::Failure(kind)) => Err(Error {
                    message: "preset failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough steps",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
