//! Request dispatcher.
//!
//! Pipeline for one validated request:
//! resolve adapter, look up credential, build wire request, send, check
//! status, parse. Each step either advances or ends the request with a
//! single [`GatewayError`].

use gateway_config::{CredentialStore, UpstreamSettings};
use gateway_core::{
    GatewayError, GatewayResult, ModelKind, NormalizedResult, ProviderAdapter, ProviderKind,
    UnifiedRequest,
};
use gateway_providers::{DeepSeekAdapter, GeminiAdapter, HttpTransport, OpenAIAdapter};
use gateway_telemetry::{redact_body, Metrics};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Routes validated requests to the provider that serves their model
pub struct Dispatcher {
    gemini: GeminiAdapter,
    openai: OpenAIAdapter,
    deepseek: DeepSeekAdapter,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn HttpTransport>,
    metrics: Option<Arc<Metrics>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("gemini", &self.gemini)
            .field("openai", &self.openai)
            .field("deepseek", &self.deepseek)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher using the configured provider base URLs
    #[must_use]
    pub fn new(
        upstream: &UpstreamSettings,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            gemini: GeminiAdapter::new(upstream.base_url(ProviderKind::Gemini)),
            openai: OpenAIAdapter::new(upstream.base_url(ProviderKind::OpenAI)),
            deepseek: DeepSeekAdapter::new(upstream.base_url(ProviderKind::DeepSeek)),
            credentials,
            transport,
            metrics: None,
        }
    }

    /// Record upstream latency into `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Adapter for a model
    pub fn resolve(&self, model: ModelKind) -> &dyn ProviderAdapter {
        match model {
            ModelKind::GeminiFlash => &self.gemini,
            ModelKind::Gpt4oMini => &self.openai,
            ModelKind::DeepSeek => &self.deepseek,
        }
    }

    /// Shared credential store
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Run one request through its provider
    ///
    /// # Errors
    /// - `MissingCredential` if the provider has no key
    /// - `UpstreamTransport` on connection failure, timeout or non-2xx status
    /// - `ContentBlocked` or `UpstreamFormat` from response normalization
    #[instrument(
        skip(self, request),
        fields(model = %request.model(), provider = %request.model().provider())
    )]
    pub async fn generate(&self, request: &UnifiedRequest) -> GatewayResult<NormalizedResult> {
        let adapter = self.resolve(request.model());
        let provider = adapter.provider();

        let credential = self.credentials.lookup(provider)?;
        let wire = adapter.build_request(request, credential);

        debug!(url = %wire.redacted_url(), "Dispatching to provider");

        let start = Instant::now();
        let sent = self.transport.send(&wire).await;
        let elapsed = start.elapsed();

        if let Some(metrics) = &self.metrics {
            metrics.observe_upstream(provider.as_str(), elapsed);
        }

        let response = sent.map_err(|e| {
            error!(error = %e, duration_ms = elapsed.as_millis(), "Upstream call failed");
            GatewayError::upstream_transport(provider, None, e.to_string())
        })?;

        if !response.is_success() {
            error!(
                status = response.status,
                body = %redact_body(&response.body),
                duration_ms = elapsed.as_millis(),
                "Upstream returned non-success status"
            );
            return Err(GatewayError::upstream_transport(
                provider,
                Some(response.status),
                format!("HTTP {}", response.status),
            ));
        }

        debug!(body = %redact_body(&response.body), "Raw upstream response");

        match adapter.parse_response(&response.body) {
            Ok(result) => {
                info!(
                    duration_ms = elapsed.as_millis(),
                    chars = result.text.len(),
                    "Upstream response normalized"
                );
                Ok(result)
            }
            Err(e @ GatewayError::UpstreamFormat { .. }) => {
                error!(error = %e, body = %redact_body(&response.body), "Unusable upstream payload");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
