//! Terminal client for the ID2 Projects API.
//!
//! The [`app::App`] controller owns all view state. HTTP calls run on a
//! Tokio runtime behind [`infrastructure::runtime::RuntimeBridge`], and their
//! completions come back as events the controller applies in arrival order.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod ui;
