//! HTTP server lifecycle.

use gateway_config::ServerSettings;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{routes::create_router, shutdown::shutdown_signal, state::AppState};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Upper bound on draining in-flight requests after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            shutdown_timeout: settings.shutdown_timeout,
        }
    }
}

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested address
        addr: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// HTTP server
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind address as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(async {
            shutdown_signal().await;
        })
        .await
    }

    /// Serve until `shutdown` resolves, then drain for at most the
    /// configured shutdown timeout
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local: Option<SocketAddr> = listener.local_addr().ok();

        info!(address = %local.map_or(addr, |a| a.to_string()), "Gateway listening");

        let app = create_router(self.state);
        let (draining_tx, mut draining_rx) = watch::channel(false);

        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Draining in-flight requests");
                let _ = draining_tx.send(true);
            })
            .into_future();

        let grace = self.config.shutdown_timeout;
        let deadline = async move {
            if draining_rx.wait_for(|draining| *draining).await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = serve => result?,
            () = deadline => {
                warn!(timeout = ?grace, "Shutdown timeout elapsed, dropping open connections");
            }
        }

        info!("Gateway stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_config::{CredentialStore, GatewayConfig};
    use gateway_providers::ReqwestTransport;
    use gateway_routing::Dispatcher;
    use gateway_telemetry::Metrics;
    use std::sync::Arc;

    fn state() -> AppState {
        let config = GatewayConfig::default();
        let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(1)).unwrap());
        let dispatcher =
            Dispatcher::new(&config.upstream, Arc::new(CredentialStore::default()), transport);
        AppState::new(dispatcher, Arc::new(Metrics::new().unwrap()))
    }

    #[test]
    fn test_config_from_settings() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            shutdown_timeout: Duration::from_secs(1),
        };
        let server = Server::new(config, state());

        let result = tokio::time::timeout(Duration::from_secs(5), server.run_until(async {}))
            .await
            .expect("server did not stop");
        assert!(result.is_ok());
    }
}
