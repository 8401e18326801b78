//! # Gateway Config
//!
//! Configuration management for the unified LLM gateway.
//!
//! - [`GatewayConfig`]: server, upstream and logging settings with defaults
//! - [`ConfigLoader`]: optional file, then environment overrides, then validation
//! - [`CredentialStore`]: provider API keys, loaded once at startup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod loader;

pub use config::{GatewayConfig, LogFormat, LoggingSettings, ServerSettings, UpstreamSettings};
pub use credentials::CredentialStore;
pub use error::ConfigError;
pub use loader::{load_config, ConfigLoader};
