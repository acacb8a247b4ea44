//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest-based Projects API client
//! - Tokio runtime bridge for async operations
//! - tracing subscriber setup

pub mod api;
pub mod logging;
pub mod runtime;
