//! DeepSeek chat-completions adapter.
//!
//! Same wire shape as OpenAI, with `top_p` forwarded and the `deepseek-chat`
//! model id.

use crate::chat::{build_chat_request, parse_chat_response, ChatDialect};
use gateway_core::{
    ApiKey, GatewayResult, NormalizedResult, ProviderAdapter, ProviderKind, ProviderWireRequest,
    UnifiedRequest,
};

/// Model id sent to DeepSeek
pub const DEEPSEEK_MODEL_ID: &str = "deepseek-chat";

const DIALECT: ChatDialect = ChatDialect {
    model_id: DEEPSEEK_MODEL_ID,
    forward_top_p: true,
};

/// DeepSeek adapter
#[derive(Debug, Clone)]
pub struct DeepSeekAdapter {
    base_url: String,
}

impl DeepSeekAdapter {
    /// Create an adapter targeting `base_url` (e.g. `https://api.deepseek.com/v1`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ProviderAdapter for DeepSeekAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    fn build_request(&self, request: &UnifiedRequest, credential: &ApiKey) -> ProviderWireRequest {
        build_chat_request(DIALECT, &self.base_url, request, credential)
    }

    fn parse_response(&self, body: &[u8]) -> GatewayResult<NormalizedResult> {
        parse_chat_response(ProviderKind::DeepSeek, body)
    }
}
