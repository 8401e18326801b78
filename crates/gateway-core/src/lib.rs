//! # Gateway Core
//!
//! Core types, traits, and error handling for the unified LLM gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The inbound request and its validation
//! - The normalized result and success envelope
//! - Provider wire requests and the `ProviderAdapter` trait
//! - The gateway error taxonomy and its status classification
//! - Validated domain types (newtypes)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod request;
pub mod response;
pub mod types;
pub mod wire;

// Re-export commonly used types
pub use error::{ErrorClass, ErrorKind, FormatIssue, GatewayError, GatewayResult};
pub use provider::ProviderAdapter;
pub use request::{GenerateRequest, UnifiedRequest};
pub use response::{GenerateResponse, NormalizedResult, ResponseData};
pub use types::{ApiKey, ModelKind, ProviderKind, Temperature, TopP};
pub use wire::ProviderWireRequest;
