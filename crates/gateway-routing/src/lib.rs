//! # Gateway Routing
//!
//! Model dispatch for the unified LLM gateway.
//!
//! The [`Dispatcher`] maps each supported model to its provider adapter,
//! attaches the provider credential, performs the single upstream call and
//! normalizes the reply.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatcher;

// Re-export main types
pub use dispatcher::Dispatcher;
