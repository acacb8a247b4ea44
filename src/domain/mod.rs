//! Domain models for the projects view
//!
//! These types carry no I/O. Records are opaque JSON objects owned by the
//! Projects API; the menu and panel registry are pure view metadata.

mod menu;
mod panels;
mod project;

pub use menu::{Menu, MenuItem};
pub use panels::{SidePanels, NAV_PANEL};
pub use project::{display_label, ProjectPayload, ProjectRecord};
