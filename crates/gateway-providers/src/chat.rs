//! OpenAI-compatible chat-completions wire format.
//!
//! Shared by the OpenAI and DeepSeek adapters, which differ only in host,
//! fixed model id and whether `top_p` is forwarded.

use gateway_core::{
    ApiKey, FormatIssue, GatewayError, GatewayResult, NormalizedResult, ProviderKind,
    ProviderWireRequest, UnifiedRequest,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Returned when the first choice carries no usable content
pub const EMPTY_CHOICE_FALLBACK: &str = "I didn't receive a valid response. Please try again.";

/// Path appended to the provider base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Per-provider differences of the chat-completions format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatDialect {
    /// Model id sent upstream
    pub model_id: &'static str,
    /// Whether `top_p` is included in the body
    pub forward_top_p: bool,
}

/// Build a chat-completions request
pub fn build_chat_request(
    dialect: ChatDialect,
    base_url: &str,
    request: &UnifiedRequest,
    credential: &ApiKey,
) -> ProviderWireRequest {
    let url = format!("{}{CHAT_COMPLETIONS_PATH}", base_url.trim_end_matches('/'));

    let mut body = json!({
        "model": dialect.model_id,
        "messages": [{ "role": "user", "content": request.message() }],
        "temperature": request.temperature().value(),
    });
    if dialect.forward_top_p {
        body["top_p"] = json!(request.top_p().value());
    }

    ProviderWireRequest::json(url, body)
        .with_header("Authorization", format!("Bearer {}", credential.expose()))
}

/// Normalize a chat-completions response.
///
/// Only the first choice is read. Blank content is a successful result with
/// [`EMPTY_CHOICE_FALLBACK`]; non-blank content is returned untrimmed.
pub fn parse_chat_response(provider: ProviderKind, body: &[u8]) -> GatewayResult<NormalizedResult> {
    let response: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| GatewayError::malformed(provider, e.to_string()))?;

    let first = response
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::upstream_format(provider, FormatIssue::NoChoices))?;

    let choice: ChatChoice = serde_json::from_value(first)
        .map_err(|e| GatewayError::malformed(provider, format!("choices[0]: {e}")))?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(NormalizedResult::new(content)),
        _ => {
            debug!(provider = %provider, "Blank choice content, using fallback text");
            Ok(NormalizedResult::new(EMPTY_CHOICE_FALLBACK))
        }
    }
}

// Chat-completions API Types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::ErrorKind;

    fn parse(value: &Value) -> GatewayResult<NormalizedResult> {
        parse_chat_response(ProviderKind::OpenAI, value.to_string().as_bytes())
    }

    #[test]
    fn test_first_choice_wins() {
        let result = parse(&json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(result.text, "first");
    }

    #[test]
    fn test_content_not_trimmed() {
        let result = parse(&json!({
            "choices": [{"message": {"content": "  padded answer \n"}}]
        }))
        .unwrap();
        assert_eq!(result.text, "  padded answer \n");
    }

    #[test]
    fn test_blank_or_null_content_uses_fallback() {
        for message in [
            json!({"content": ""}),
            json!({"content": "  \n "}),
            json!({"content": null}),
            json!({"role": "assistant"}),
        ] {
            let result = parse(&json!({"choices": [{"message": message}]})).unwrap();
            assert_eq!(result.text, EMPTY_CHOICE_FALLBACK);
        }
    }

    #[test]
    fn test_missing_or_empty_choices() {
        for body in [json!({"choices": []}), json!({"id": "x"}), json!({"choices": null})] {
            let err = parse(&body).unwrap_err();
            assert_eq!(
                err,
                GatewayError::upstream_format(ProviderKind::OpenAI, FormatIssue::NoChoices)
            );
            assert_eq!(err.public_message(), "No response generated");
        }
    }

    #[test]
    fn test_choice_without_message_is_malformed() {
        let err = parse(&json!({"choices": [{"index": 0}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);
        assert_eq!(err.public_message(), "Invalid API response format");
    }

    #[test]
    fn test_later_choices_are_not_inspected() {
        let result = parse(&json!({
            "choices": [{"message": {"content": "ok"}}, {"garbage": true}]
        }))
        .unwrap();
        assert_eq!(result.text, "ok");
    }

    #[test]
    fn test_parse_is_idempotent() {
        for body in [
            json!({"choices": [{"message": {"content": "same answer"}}]}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": []}),
        ] {
            let bytes = body.to_string();
            assert_eq!(
                parse_chat_response(ProviderKind::DeepSeek, bytes.as_bytes()),
                parse_chat_response(ProviderKind::DeepSeek, bytes.as_bytes())
            );
        }
    }

    #[test]
    fn test_provider_carried_in_error() {
        let err = parse_chat_response(ProviderKind::DeepSeek, b"not json").unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UpstreamFormat { provider: ProviderKind::DeepSeek, .. }
        ));
    }
}
