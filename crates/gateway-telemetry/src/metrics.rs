//! Prometheus metrics.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Outcome label for `gateway_requests_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The caller received a generated message
    Success,
    /// The caller received an error body
    Error,
}

impl RequestOutcome {
    /// Label value
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Metrics error
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Registration or collection failed
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Encoded output was not UTF-8
    #[error("Metrics output is not valid UTF-8")]
    Encoding,
}

/// Gateway metrics, backed by a private registry
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    upstream_duration: HistogramVec,
    errors_total: IntCounterVec,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

impl Metrics {
    /// Create and register all gateway metrics
    ///
    /// # Errors
    /// Returns an error if a metric cannot be created or registered
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("gateway_requests_total", "Generation requests by model and outcome"),
            &["model", "outcome"],
        )?;

        let upstream_duration = HistogramVec::new(
            HistogramOpts::new(
                "gateway_upstream_duration_seconds",
                "Upstream provider call duration",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
            &["provider"],
        )?;

        let errors_total = IntCounterVec::new(
            Opts::new("gateway_errors_total", "Gateway errors by kind"),
            &["kind"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(upstream_duration.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            upstream_duration,
            errors_total,
        })
    }

    /// Count a finished request
    pub fn record_request(&self, model: &str, outcome: RequestOutcome) {
        self.requests_total
            .with_label_values(&[model, outcome.as_str()])
            .inc();
    }

    /// Observe one upstream call, successful or not
    pub fn observe_upstream(&self, provider: &str, duration: Duration) {
        self.upstream_duration
            .with_label_values(&[provider])
            .observe(duration.as_secs_f64());
    }

    /// Count an error by kind
    pub fn record_error(&self, kind: &str) {
        self.errors_total.with_label_values(&[kind]).inc();
    }

    /// Render all metrics in the Prometheus text format
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn gather_text(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|_| MetricsError::Encoding)
    }

    /// Content type of [`Metrics::gather_text`]
    #[must_use]
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
