//! Named, collapsible side panels

use std::collections::BTreeMap;

/// Identifier of the navigation panel holding the menu
pub const NAV_PANEL: &str = "left";

/// Visibility registry keyed by panel id
#[derive(Debug, Clone, Default)]
pub struct SidePanels {
    open: BTreeMap<String, bool>,
}

impl SidePanels {
    /// Registry with the given panels initially visible
    pub fn with_open<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            open: ids.into_iter().map(|id| (id.to_string(), true)).collect(),
        }
    }

    /// Flip visibility of `panel_id`; unknown ids start closed, so the first
    /// toggle opens them. Returns the new visibility.
    pub fn toggle(&mut self, panel_id: &str) -> bool {
        let entry = self.open.entry(panel_id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn is_open(&self, panel_id: &str) -> bool {
        self.open.get(panel_id).copied().unwrap_or(false)
    }
}
