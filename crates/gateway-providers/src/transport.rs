//! Outbound HTTP transport.
//!
//! The dispatcher never talks to `reqwest` directly; it sends a
//! [`ProviderWireRequest`] through an [`HttpTransport`], which lets tests swap
//! in an in-memory implementation.

use async_trait::async_trait;
use bytes::Bytes;
use gateway_core::ProviderWireRequest;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Raw upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Unparsed body
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport failures. Messages never contain the request URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be constructed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The response body could not be read
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Sends wire requests upstream
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST the request body and return the raw reply, whatever its status
    async fn send(&self, request: &ProviderWireRequest) -> Result<UpstreamResponse, TransportError>;
}

/// `reqwest`-backed transport with a per-request timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the given upstream timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(100)
            .build()
            .map_err(|e| {
                TransportError::InvalidRequest(format!("Failed to create HTTP client: {}", e.without_url()))
            })?;

        Ok(Self { client, timeout })
    }

    fn header_map(request: &ProviderWireRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidRequest(format!("header name {name}: {e}")))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidRequest(format!("header value for {name}")))?;
            if name == reqwest::header::AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.without_url().to_string())
        } else {
            TransportError::Connection(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ProviderWireRequest) -> Result<UpstreamResponse, TransportError> {
        let headers = Self::header_map(request)?;

        debug!(url = %request.redacted_url(), "Sending upstream request");

        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                let err = self.map_error(e);
                error!(error = %err, url = %request.redacted_url(), "Upstream request failed");
                err
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.without_url().to_string()))?;

        trace!(status, bytes = body.len(), "Received upstream response");

        Ok(UpstreamResponse { status, body })
    }
}
