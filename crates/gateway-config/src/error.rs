//! Configuration error types.

use std::path::PathBuf;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Unsupported config file extension
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Environment override could not be parsed
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// Variable name
        var: String,
        /// What was wrong
        message: String,
    },

    /// Loaded configuration failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Required provider API keys are absent
    #[error("Missing API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_display() {
        let err = ConfigError::MissingCredentials(vec!["GEMINI".into(), "DEEPSEEK".into()]);
        assert_eq!(err.to_string(), "Missing API keys: GEMINI, DEEPSEEK");
    }
}
