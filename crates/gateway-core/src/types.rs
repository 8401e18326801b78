//! Validated domain types.
//!
//! The model and provider sets are closed enums; sampling parameters are
//! newtypes that can only be constructed inside their documented range.

use crate::error::GatewayError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Models accepted by the gateway.
///
/// Deserialization is the schema boundary: any identifier outside this set is
/// rejected before a request is ever validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// Google Gemini 1.5 Flash
    #[default]
    #[serde(rename = "gemini-1.5-flash")]
    GeminiFlash,
    /// OpenAI GPT-4o mini
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    /// DeepSeek chat
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ModelKind {
    /// Every supported model
    pub const ALL: [Self; 3] = [Self::GeminiFlash, Self::Gpt4oMini, Self::DeepSeek];

    /// Identifier used on the inbound API
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "gemini-1.5-flash",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Provider that serves this model
    #[must_use]
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::GeminiFlash => ProviderKind::Gemini,
            Self::Gpt4oMini => ProviderKind::OpenAI,
            Self::DeepSeek => ProviderKind::DeepSeek,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API
    Gemini,
    /// OpenAI chat completions
    #[serde(rename = "openai")]
    OpenAI,
    /// DeepSeek chat completions
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ProviderKind {
    /// Every provider the gateway requires a credential for
    pub const ALL: [Self; 3] = [Self::Gemini, Self::OpenAI, Self::DeepSeek];

    /// Short label used in logs and metrics
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Credential name, as reported when a key is missing at startup
    #[must_use]
    pub fn credential_name(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI",
            Self::OpenAI => "OPENAI",
            Self::DeepSeek => "DEEPSEEK",
        }
    }

    /// Environment variable holding the credential
    #[must_use]
    pub fn credential_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling temperature in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    /// Create a validated temperature
    ///
    /// # Errors
    /// Returns a validation error if the value is outside `[0.0, 1.0]`
    pub fn new(value: f64) -> Result<Self, GatewayError> {
        unit_interval(value, "temperature").map(Self)
    }

    /// Inner value
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Nucleus sampling parameter in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TopP(f64);

impl TopP {
    /// Create a validated top_p
    ///
    /// # Errors
    /// Returns a validation error if the value is outside `[0.0, 1.0]`
    pub fn new(value: f64) -> Result<Self, GatewayError> {
        unit_interval(value, "top_p").map(Self)
    }

    /// Inner value
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

fn unit_interval(value: f64, field: &str) -> Result<f64, GatewayError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GatewayError::validation(
            format!("{field} must be between 0.0 and 1.0, got {value}"),
            Some(field.to_string()),
        ))
    }
}

/// Provider API key. Never printed.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wrap a raw key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::new(key.into()))
    }

    /// Expose the raw key for building a wire request
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
