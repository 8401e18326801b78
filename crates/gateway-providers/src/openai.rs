//! OpenAI chat-completions adapter.
//!
//! Serves the `gpt-4o-mini` model. `top_p` is not forwarded.

use crate::chat::{build_chat_request, parse_chat_response, ChatDialect};
use gateway_core::{
    ApiKey, GatewayResult, NormalizedResult, ProviderAdapter, ProviderKind, ProviderWireRequest,
    UnifiedRequest,
};

/// Model id sent to OpenAI
pub const OPENAI_MODEL_ID: &str = "gpt-4o-mini";

const DIALECT: ChatDialect = ChatDialect {
    model_id: OPENAI_MODEL_ID,
    forward_top_p: false,
};

/// OpenAI adapter
#[derive(Debug, Clone)]
pub struct OpenAIAdapter {
    base_url: String,
}

impl OpenAIAdapter {
    /// Create an adapter targeting `base_url` (e.g. `https://api.openai.com/v1`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ProviderAdapter for OpenAIAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn build_request(&self, request: &UnifiedRequest, credential: &ApiKey) -> ProviderWireRequest {
        build_chat_request(DIALECT, &self.base_url, request, credential)
    }

    fn parse_response(&self, body: &[u8]) -> GatewayResult<NormalizedResult> {
        parse_chat_response(ProviderKind::OpenAI, body)
    }
}
