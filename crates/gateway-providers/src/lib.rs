//! # Gateway Providers
//!
//! Provider adapters for the unified LLM gateway:
//! - Gemini (`generateContent`, API key as query parameter)
//! - OpenAI chat completions (bearer token)
//! - DeepSeek chat completions (OpenAI-compatible, bearer token)
//!
//! Adapters are pure translators. The only I/O lives in [`transport`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod deepseek;
pub mod gemini;
pub mod openai;
pub mod transport;

// Re-export main types
pub use deepseek::DeepSeekAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAIAdapter;
pub use transport::{HttpTransport, ReqwestTransport, TransportError, UpstreamResponse};
