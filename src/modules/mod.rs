//! UI Modules
//!
//! Each module implements the Module trait and handles its own key input.
//!
//! Modules:
//! - dialog: new project modal lifecycle and its form

pub mod dialog;
