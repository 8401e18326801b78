//! Configuration loading.
//!
//! Order of precedence: defaults, then the optional config file, then
//! environment variables. The result is validated before it is returned.

use crate::config::{GatewayConfig, LogFormat};
use crate::error::ConfigError;
use humantime_serde::re::humantime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Builder-style configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_overrides: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with environment overrides enabled and no file
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            env_overrides: true,
        }
    }

    /// Read settings from a YAML, TOML or JSON file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Enable or disable environment overrides
    #[must_use]
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    /// Load the configuration using the process environment
    pub async fn load(self) -> Result<GatewayConfig, ConfigError> {
        self.load_with(|name| std::env::var(name).ok()).await
    }

    /// Load the configuration with a custom variable lookup
    pub async fn load_with<F>(self, lookup: F) -> Result<GatewayConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.file {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                read_file(path).await?
            }
            None => GatewayConfig::default(),
        };

        if self.env_overrides {
            apply_env_overrides(&mut config, lookup)?;
        }

        config.check()?;
        Ok(config)
    }
}

/// Load configuration from `GATEWAY_CONFIG` (if set) plus environment overrides
pub async fn load_config() -> Result<GatewayConfig, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        loader = loader.with_file(path);
    }
    loader.load().await
}

async fn read_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| parse_err(e.to_string())),
        "toml" => toml::from_str(&contents).map_err(|e| parse_err(e.to_string())),
        "json" => serde_json::from_str(&contents).map_err(|e| parse_err(e.to_string())),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("GATEWAY_HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("GATEWAY_PORT") {
        config.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
            var: "GATEWAY_PORT".to_string(),
            message: format!("{e}"),
        })?;
    }
    if let Some(raw) = get("GATEWAY_SHUTDOWN_TIMEOUT") {
        config.server.shutdown_timeout = parse_duration("GATEWAY_SHUTDOWN_TIMEOUT", &raw)?;
    }
    if let Some(raw) = get("GATEWAY_UPSTREAM_TIMEOUT") {
        config.upstream.timeout = parse_duration("GATEWAY_UPSTREAM_TIMEOUT", &raw)?;
    }
    if let Some(url) = get("GEMINI_BASE_URL") {
        config.upstream.gemini_base_url = url;
    }
    if let Some(url) = get("OPENAI_BASE_URL") {
        config.upstream.openai_base_url = url;
    }
    if let Some(url) = get("DEEPSEEK_BASE_URL") {
        config.upstream.deepseek_base_url = url;
    }
    if let Some(level) = get("GATEWAY_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(raw) = get("GATEWAY_LOG_FORMAT") {
        config.logging.format =
            raw.parse::<LogFormat>()
                .map_err(|message| ConfigError::InvalidEnv {
                    var: "GATEWAY_LOG_FORMAT".to_string(),
                    message,
                })?;
    }
    if let Some(file) = get("GATEWAY_LOG_FILE") {
        config.logging.file = Some(PathBuf::from(file));
    }

    debug!("Applied environment overrides");
    Ok(())
}

fn parse_duration(var: &str, raw: &str) -> Result<std::time::Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::InvalidEnv {
        var: var.to_string(),
        message: e.to_string(),
    })
}
