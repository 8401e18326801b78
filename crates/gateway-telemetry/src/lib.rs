//! # Gateway Telemetry
//!
//! Observability for the unified LLM gateway.
//!
//! This crate provides:
//! - Structured logging setup (pretty or JSON, stdout or file)
//! - Prometheus metrics for requests, upstream latency and errors
//! - Secret redaction for anything that ends up in a log line

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod metrics;
pub mod redact;

// Re-export main types
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use metrics::{Metrics, MetricsError, RequestOutcome};
pub use redact::{redact_body, redact_secrets};
