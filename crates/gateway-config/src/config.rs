//! Gateway configuration model.

use crate::error::ConfigError;
use gateway_core::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default Gemini API base
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default OpenAI API base
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default DeepSeek API base
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[validate(nested)]
    pub server: ServerSettings,
    /// Upstream provider settings
    pub upstream: UpstreamSettings,
    /// Logging settings
    #[validate(nested)]
    pub logging: LoggingSettings,
}

impl GatewayConfig {
    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem found
    pub fn check(&self) -> Result<(), ConfigError> {
        Validate::validate(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.server.shutdown_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "server.shutdown_timeout must be non-zero".to_string(),
            ));
        }
        if self.upstream.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "upstream.timeout must be non-zero".to_string(),
            ));
        }

        for provider in ProviderKind::ALL {
            let raw = self.upstream.base_url(provider);
            let url = Url::parse(raw).map_err(|e| {
                ConfigError::Invalid(format!("{provider} base URL {raw:?} is invalid: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "{provider} base URL must use http or https"
                )));
            }
        }

        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    #[validate(length(min = 1, message = "server.host cannot be empty"))]
    pub host: String,
    /// Bind port
    #[validate(range(min = 1, message = "server.port must be non-zero"))]
    pub port: u16,
    /// Time allowed for in-flight requests to finish on shutdown
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Upstream provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Timeout for one upstream call
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// OpenAI API base URL
    pub openai_base_url: String,
    /// DeepSeek API base URL
    pub deepseek_base_url: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            deepseek_base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
        }
    }
}

impl UpstreamSettings {
    /// Base URL configured for a provider
    #[must_use]
    pub fn base_url(&self, provider: ProviderKind) -> &str {
        match provider {
            ProviderKind::Gemini => &self.gemini_base_url,
            ProviderKind::OpenAI => &self.openai_base_url,
            ProviderKind::DeepSeek => &self.deepseek_base_url,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}, expected pretty or json")),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive (overridden by `RUST_LOG`)
    #[validate(length(min = 1, message = "logging.level cannot be empty"))]
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Append logs to this file instead of stdout
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}
