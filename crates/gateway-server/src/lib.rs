//! # Gateway Server
//!
//! HTTP server for the unified LLM gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server with the `POST /api/generate` endpoint
//! - Health, readiness, liveness and metrics endpoints
//! - Central mapping from gateway errors to HTTP responses
//! - Request-id, logging, CORS and panic-catching middleware
//! - Graceful shutdown handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ServerConfig, ServerError};
pub use shutdown::shutdown_signal;
pub use state::AppState;
