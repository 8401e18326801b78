//! Google Gemini adapter.
//!
//! # API Format
//! `POST {base}/models/{MODEL}:generateContent?key={API_KEY}`
//!
//! Responses are normalized in a fixed order: a prompt block reason wins over
//! everything, then an empty candidate list is a format error, then the parts
//! of the first candidate are concatenated.

use gateway_core::{
    ApiKey, FormatIssue, GatewayError, GatewayResult, NormalizedResult, ProviderAdapter,
    ProviderKind, ProviderWireRequest, UnifiedRequest,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Returned when the candidate parts contain no usable text
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "Received an empty response. Please try rephrasing your question.";

/// Gemini adapter
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    base_url: String,
}

impl GeminiAdapter {
    /// Create an adapter targeting `base_url` (e.g. `https://generativelanguage.googleapis.com/v1beta`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the endpoint URL for a model
    fn endpoint_url(&self, model: &str, api_key: &str) -> String {
        let key: String = url::form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        format!("{}/models/{model}:generateContent?key={key}", self.base_url)
    }

    /// Concatenate candidate parts in order.
    ///
    /// Text parts contribute their trimmed text plus a newline; function calls
    /// contribute a bracketed marker with the function name only. Any other
    /// part shape is skipped.
    fn collect_parts(parts: &[GeminiPart]) -> GatewayResult<String> {
        let mut text = String::new();
        for part in parts {
            match part {
                GeminiPart::Text { text: t } => {
                    text.push_str(t.trim());
                    text.push('\n');
                }
                GeminiPart::FunctionCall { function_call } => {
                    let name = function_call
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            GatewayError::malformed(
                                ProviderKind::Gemini,
                                "functionCall part without a name",
                            )
                        })?;
                    text.push_str(&format!("[Function call: {name}]"));
                }
                GeminiPart::Other(_) => {}
            }
        }
        Ok(text)
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn build_request(&self, request: &UnifiedRequest, credential: &ApiKey) -> ProviderWireRequest {
        let url = self.endpoint_url(request.model().as_str(), credential.expose());

        let body = json!({
            "contents": [{
                "parts": [{ "text": request.message() }]
            }],
            "generationConfig": {
                "temperature": request.temperature().value(),
                "topP": request.top_p().value(),
            }
        });

        ProviderWireRequest::json(url, body)
    }

    fn parse_response(&self, body: &[u8]) -> GatewayResult<NormalizedResult> {
        let response: GeminiResponse = serde_json::from_slice(body)
            .map_err(|e| GatewayError::malformed(ProviderKind::Gemini, e.to_string()))?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .filter(|r| !r.is_empty())
        {
            warn!(provider = "gemini", block_reason = %reason, "Content blocked by provider");
            return Err(GatewayError::content_blocked(reason));
        }

        let first = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                GatewayError::upstream_format(ProviderKind::Gemini, FormatIssue::NoCandidates)
            })?;

        let candidate: GeminiCandidate = serde_json::from_value(first).map_err(|e| {
            GatewayError::malformed(ProviderKind::Gemini, format!("candidates[0]: {e}"))
        })?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let text = Self::collect_parts(&parts)?;

        if text.trim().is_empty() {
            debug!(provider = "gemini", parts = parts.len(), "Empty candidate, using fallback text");
            return Ok(NormalizedResult::new(EMPTY_RESPONSE_FALLBACK));
        }

        Ok(NormalizedResult::new(text.trim()))
    }
}

// Gemini API Types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Option<Vec<Value>>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Variant order matters: a part carrying both `text` and `functionCall`
/// is treated as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: Map<String, Value>,
    },
    Other(#[allow(dead_code)] Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{ErrorKind, GenerateRequest, ModelKind};

    fn adapter() -> GeminiAdapter {
        GeminiAdapter::new("https://generativelanguage.googleapis.com/v1beta/")
    }

    fn parse(value: &Value) -> GatewayResult<NormalizedResult> {
        adapter().parse_response(value.to_string().as_bytes())
    }

    #[test]
    fn test_build_request() {
        let request = GenerateRequest::new("  Why is the sky blue? ", ModelKind::GeminiFlash)
            .with_temperature(0.7)
            .with_top_p(0.9)
            .validate()
            .unwrap();
        let wire = adapter().build_request(&request, &ApiKey::new("test-key"));

        assert_eq!(
            wire.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=test-key"
        );
        assert_eq!(wire.header("Content-Type"), Some("application/json"));
        assert!(wire.header("Authorization").is_none());
        assert_eq!(
            wire.body,
            json!({
                "contents": [{"parts": [{"text": "Why is the sky blue?"}]}],
                "generationConfig": {"temperature": 0.7, "topP": 0.9}
            })
        );
    }

    #[test]
    fn test_key_is_url_encoded() {
        let request = GenerateRequest::new("hi", ModelKind::GeminiFlash)
            .validate()
            .unwrap();
        let wire = adapter().build_request(&request, &ApiKey::new("a&b=c"));
        assert!(wire.url.ends_with("key=a%26b%3Dc"));
    }

    #[test]
    fn test_block_reason_takes_precedence() {
        let err = parse(&json!({
            "promptFeedback": {"blockReason": "SAFETY"},
            "candidates": [{"content": {"parts": [{"text": "ignored"}]}}]
        }))
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ContentBlocked);
        assert_eq!(err.public_message(), "Content blocked: Safety");
    }

    #[test]
    fn test_empty_block_reason_ignored() {
        let result = parse(&json!({
            "promptFeedback": {"blockReason": ""},
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        }))
        .unwrap();
        assert_eq!(result.text, "ok");
    }

    #[test]
    fn test_empty_candidates() {
        let err = parse(&json!({"candidates": []})).unwrap_err();
        assert_eq!(
            err,
            GatewayError::upstream_format(ProviderKind::Gemini, FormatIssue::NoCandidates)
        );

        let err = parse(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);
    }

    #[test]
    fn test_multi_part_concatenation() {
        let result = parse(&json!({
            "candidates": [{"content": {"parts": [{"text": "Hello"}, {"text": "World"}]}}]
        }))
        .unwrap();
        assert_eq!(result.text, "Hello\nWorld");
    }

    #[test]
    fn test_parts_are_trimmed() {
        let result = parse(&json!({
            "candidates": [{"content": {"parts": [{"text": "  Hello  \n"}, {"text": "\nWorld\n\n"}]}}]
        }))
        .unwrap();
        assert_eq!(result.text, "Hello\nWorld");
    }

    #[test]
    fn test_function_call_marker() {
        let result = parse(&json!({
            "candidates": [{"content": {"parts": [
                {"text": "Checking"},
                {"functionCall": {"name": "get_weather", "args": {"city": "Paris"}}}
            ]}}]
        }))
        .unwrap();
        assert_eq!(result.text, "Checking\n[Function call: get_weather]");
        assert!(!result.text.contains("Paris"));
    }

    #[test]
    fn test_function_call_without_name_is_malformed() {
        let err = parse(&json!({
            "candidates": [{"content": {"parts": [{"functionCall": {"args": {}}}]}}]
        }))
        .unwrap_err();
        assert_eq!(err.public_message(), "Invalid API response format");
    }

    #[test]
    fn test_unknown_parts_skipped() {
        let result = parse(&json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"text": "caption"}
            ]}}]
        }))
        .unwrap();
        assert_eq!(result.text, "caption");
    }

    #[test]
    fn test_empty_parts_use_fallback() {
        for body in [
            json!({"candidates": [{"content": {"parts": [{"text": "   "}]}}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
        ] {
            let result = parse(&body).unwrap();
            assert_eq!(result.text, EMPTY_RESPONSE_FALLBACK);
        }
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let err = adapter().parse_response(b"<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);
    }

    #[test]
    fn test_later_candidates_are_not_inspected() {
        let result = parse(&json!({
            "candidates": [
                {"content": {"parts": [{"text": "first answer"}]}},
                {"content": "unexpected"}
            ]
        }))
        .unwrap();
        assert_eq!(result.text, "first answer");
    }

    #[test]
    fn test_malformed_first_candidate() {
        let err = parse(&json!({"candidates": [{"content": "unexpected"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);
        assert_eq!(err.public_message(), "Invalid API response format");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "A"}, {"functionCall": {"name": "f"}}]}}]
        })
        .to_string();
        let adapter = adapter();
        assert_eq!(
            adapter.parse_response(body.as_bytes()),
            adapter.parse_response(body.as_bytes())
        );

        let blocked = json!({"promptFeedback": {"blockReason": "OTHER"}}).to_string();
        assert_eq!(
            adapter.parse_response(blocked.as_bytes()),
            adapter.parse_response(blocked.as_bytes())
        );
    }
}
