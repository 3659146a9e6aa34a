use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use llama_chat_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelRequest, ModelResponse,
};

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the latest user message back.
struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            let Some(last) = req.messages.last() else {
                break 'blk Err(FakeModelProviderError(ErrorKind::Other));
            };

            let content = match last {
                ModelMessage::User(text) => text.as_str(),
                _ => unreachable!("unexpected message: {last:?}"),
            };

            Ok(ModelResponse {
                id: Some(format!("fake:{}", req.messages.len())),
                content: format!("You said {content}"),
                finish_reason: Some(ModelFinishReason::Stop),
                usage: None,
            })
        };
        ready(result)
    }
}

#[tokio::test]
async fn test_completion() {
    let provider = FakeModelProvider;
    let req = ModelRequest {
        model: None,
        messages: vec![
            ModelMessage::User("Hi".to_string()),
            ModelMessage::Assistant("You said Hi".to_string()),
            ModelMessage::User("Good morning".to_string()),
        ],
    };
    let resp = provider.send_request(&req).await.unwrap();

    assert_eq!(resp.content, "You said Good morning");
    assert_eq!(resp.id.as_deref(), Some("fake:3"));
    assert_eq!(resp.finish_reason, Some(ModelFinishReason::Stop));
}

#[tokio::test]
async fn test_error() {
    let provider = FakeModelProvider;
    let req = ModelRequest::default();
    let result = provider.send_request(&req).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}
