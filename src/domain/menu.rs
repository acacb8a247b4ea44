//! Navigation menu metadata

/// One entry of the navigation menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Glyph identifier (font-awesome class name)
    pub icon: &'static str,
    /// Display label
    pub name: &'static str,
}

impl MenuItem {
    /// Single-cell glyph used by the terminal renderer
    pub fn glyph(&self) -> char {
        match self.icon {
            "fa-search" => '?',
            "fa-database" => '#',
            "fa-ticket" => '!',
            "fa-folder" => '+',
            _ => '*',
        }
    }
}

/// The fixed menu and the currently highlighted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub const ITEMS: [MenuItem; 4] = [
        MenuItem {
            icon: "fa-search",
            name: "Search",
        },
        MenuItem {
            icon: "fa-database",
            name: "Databases",
        },
        MenuItem {
            icon: "fa-ticket",
            name: "Tickets",
        },
        MenuItem {
            icon: "fa-folder",
            name: "Projects",
        },
    ];

    /// Index highlighted at startup ("Databases")
    const DEFAULT_SELECTED: usize = 1;

    pub fn new() -> Self {
        Self {
            selected: Self::DEFAULT_SELECTED,
        }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        &Self::ITEMS
    }

    pub fn selected(&self) -> MenuItem {
        Self::ITEMS[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Highlight the entry with the given name. Returns false if unknown.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match Self::ITEMS
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        let len = Self::ITEMS.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_items_in_order() {
        let names: Vec<&str> = Menu::new().items().iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Search", "Databases", "Tickets", "Projects"]);
    }

    #[test]
    fn test_default_selection_is_databases() {
        let menu = Menu::new();
        assert_eq!(menu.selected().name, "Databases");
        assert_eq!(menu.selected().icon, "fa-database");
    }

    #[test]
    fn test_select_and_cycle() {
        let mut menu = Menu::new();
        assert!(menu.select_by_name("tickets"));
        assert_eq!(menu.selected().name, "Tickets");
        assert!(!menu.select_by_name("Nope"));
        assert_eq!(menu.selected().name, "Tickets");
        menu.cycle(true);
        menu.cycle(true);
        assert_eq!(menu.selected().name, "Search");
        menu.cycle(false);
        assert_eq!(menu.selected().name, "Projects");
    }
}
