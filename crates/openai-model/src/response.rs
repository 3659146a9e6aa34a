use llama_chat_model::{
    ErrorKind, ModelFinishReason, ModelResponse, ModelUsage,
};
use mime::Mime;
use reqwest::StatusCode;

use crate::Error;
use crate::proto::{ChatCompletion, ErrorBody};

/// Returns whether the `Content-Type` header denotes a JSON payload.
///
/// A missing header is accepted, some compatible servers omit it.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    content_type
        .parse::<Mime>()
        .map(|m| {
            m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
        })
        .unwrap_or(false)
}

/// Decodes a successful completion body into a [`ModelResponse`].
pub fn parse_completion(body: &str) -> Result<ModelResponse, Error> {
    let mut completion = serde_json::from_str::<ChatCompletion>(body)
        .map_err(|err| {
            Error::new(
                format!("Malformed completion: {err}"),
                ErrorKind::InvalidResponse,
            )
        })?;

    if completion.choices.is_empty() {
        return Err(Error::new(
            "Completion contains no choices",
            ErrorKind::InvalidResponse,
        ));
    }
    let choice = completion.choices.swap_remove(0);

    let finish_reason =
        choice
            .finish_reason
            .as_deref()
            .map(|reason| match reason {
                "stop" => ModelFinishReason::Stop,
                "length" => ModelFinishReason::Length,
                _ => ModelFinishReason::Other,
            });
    let usage = completion.usage.map(|usage| ModelUsage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    });

    Ok(ModelResponse {
        id: completion.id,
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
        usage,
    })
}

/// Builds the error for a response with a non-success status.
pub fn status_error(status: StatusCode, body: &str) -> Error {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ErrorKind::Unauthorized
        }
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimitExceeded,
        _ => ErrorKind::Other,
    };
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(error_body) => format!("{status}: {}", error_body.error.message),
        Err(_) => format!("{status}"),
    };
    Error::new(message, kind)
}

#[cfg(test)]
mod tests {
    use llama_chat_model::ModelProviderError;

    use super::*;

    #[test]
    fn test_parse_completion() {
        let resp =
            parse_completion(include_str!("../fixtures/completion.json"))
                .unwrap();
        assert_eq!(resp.id.as_deref(), Some("chatcmpl-7f3b9e2a"));
        assert_eq!(resp.content, "Hi there!");
        assert_eq!(resp.finish_reason, Some(ModelFinishReason::Stop));
        assert_eq!(
            resp.usage,
            Some(ModelUsage {
                prompt_tokens: 12,
                completion_tokens: 4,
                total_tokens: 16,
            })
        );
    }

    #[test]
    fn test_null_content_is_empty_reply() {
        let resp =
            parse_completion(include_str!("../fixtures/null_content.json"))
                .unwrap();
        assert_eq!(resp.content, "");
        assert_eq!(resp.finish_reason, Some(ModelFinishReason::Length));
        assert_eq!(resp.usage, None);
    }

    #[test]
    fn test_partial_usage_is_accepted() {
        let resp =
            parse_completion(include_str!("../fixtures/partial_usage.json"))
                .unwrap();
        assert_eq!(resp.content, "Hi there!");
        assert_eq!(
            resp.usage,
            Some(ModelUsage {
                prompt_tokens: 5,
                completion_tokens: 3,
                total_tokens: 0,
            })
        );
    }

    #[test]
    fn test_malformed_completion() {
        let err = parse_completion("<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);

        let err = parse_completion(r#"{"id": "x", "choices": []}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.message(), "Completion contains no choices");
    }

    #[test]
    fn test_status_error() {
        let err = status_error(
            StatusCode::UNAUTHORIZED,
            include_str!("../fixtures/error.json"),
        );
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            err.to_string(),
            "401 Unauthorized: Invalid API key provided."
        );

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        assert_eq!(err.to_string(), "429 Too Many Requests");

        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_content_type() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("application/json; charset=utf-8")));
        assert!(is_json_content_type(Some("application/problem+json")));
        assert!(is_json_content_type(None));
        assert!(!is_json_content_type(Some("text/html")));
        assert!(!is_json_content_type(Some("text/event-stream")));
    }
}
