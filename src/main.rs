//! # Unified LLM Gateway
//!
//! Single text-generation API in front of Gemini, OpenAI and DeepSeek.
//!
//! ## Usage
//!
//! ```bash
//! # Provider keys are required; a .env file in the working directory is honoured
//! export GEMINI_API_KEY=... OPENAI_API_KEY=... DEEPSEEK_API_KEY=...
//!
//! # Start with defaults (0.0.0.0:8000)
//! unified-llm-gateway
//!
//! # Start with a config file and environment overrides
//! GATEWAY_CONFIG=gateway.yaml GATEWAY_PORT=9000 unified-llm-gateway
//! ```

use gateway_config::{load_config, CredentialStore, GatewayConfig, LogFormat};
use gateway_providers::ReqwestTransport;
use gateway_routing::Dispatcher;
use gateway_server::{AppState, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig, Metrics};
use std::sync::Arc;
use tracing::{error, info};

/// Application entry point
#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Logging settings come from the config, so load it first
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&logging_config(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Unified LLM Gateway"
    );

    if let Err(e) = run(config).await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        upstream_timeout = ?config.upstream.timeout,
        "Configuration loaded"
    );

    // Refuse to serve without every provider key
    let credentials = Arc::new(CredentialStore::from_env()?);

    let metrics = Arc::new(Metrics::new()?);
    let transport = Arc::new(ReqwestTransport::new(config.upstream.timeout)?);
    let dispatcher =
        Dispatcher::new(&config.upstream, credentials, transport).with_metrics(metrics.clone());

    let server_config = ServerConfig::from(&config.server);
    let state = AppState::new(dispatcher, metrics);

    Server::new(server_config, state).run().await?;

    info!("Shutdown complete");
    Ok(())
}

fn logging_config(config: &GatewayConfig) -> LoggingConfig {
    let mut logging = LoggingConfig::new(config.logging.level.clone())
        .with_json(config.logging.format == LogFormat::Json);
    if let Some(file) = &config.logging.file {
        logging = logging.with_file(file.clone());
    }
    logging
}
