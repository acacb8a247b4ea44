use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::modules::dialog::TriggerEvent;

/// Width of the "+ New project" header button, borders included
pub const NEW_BUTTON_WIDTH: u16 = 17;

const DIALOG_WIDTH: u16 = 56;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub new_button: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub list: Rect,
    pub details: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect, nav_open: bool) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let header = vertical[0];
    let button_width = NEW_BUTTON_WIDTH.min(header.width);
    let new_button = Rect {
        x: header.x + header.width - button_width,
        y: header.y,
        width: button_width,
        height: header.height,
    };

    let (sidebar, list, details) = if nav_open {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(40),
                Constraint::Percentage(40),
            ])
            .split(vertical[1]);
        (Some(chunks[0]), chunks[1], chunks[2])
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical[1]);
        (None, chunks[0], chunks[1])
    };

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header,
        new_button,
        main: vertical[1],
        sidebar,
        list,
        details,
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// Popup area for the new project dialog. Clicks anchor the popup at the
/// click position, shifted to stay on screen; keyboard opens are centered.
pub fn dialog_rect(trigger: TriggerEvent, field_count: usize, size: Rect) -> Rect {
    // title row + two rows per field + hint row + borders
    let wanted_height = (field_count as u16).saturating_mul(2).saturating_add(4);
    let width = DIALOG_WIDTH.min(size.width);
    let height = wanted_height.min(size.height);

    let (x, y) = match trigger {
        TriggerEvent::Click { column, row } => (
            column.min(size.x + size.width - width),
            row.saturating_add(1).min(size.y + size.height - height),
        ),
        TriggerEvent::Key => (
            size.x + (size.width - width) / 2,
            size.y + (size.height - height) / 2,
        ),
    };

    Rect {
        x: x.max(size.x),
        y: y.max(size.y),
        width,
        height,
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn test_nav_panel_controls_sidebar() {
        let open = areas(screen(), true);
        assert!(open.sidebar.is_some());
        let closed = areas(screen(), false);
        assert!(closed.sidebar.is_none());
        assert_eq!(closed.list.x, 0);
        assert_eq!(open.new_button.x + open.new_button.width, 120);
    }

    #[test]
    fn test_keyboard_dialog_is_centered() {
        let rect = dialog_rect(TriggerEvent::Key, 2, screen());
        assert_eq!(rect, Rect::new(32, 16, 56, 8));
    }

    #[test]
    fn test_click_dialog_anchors_and_clamps() {
        let rect = dialog_rect(TriggerEvent::Click { column: 10, row: 2 }, 2, screen());
        assert_eq!((rect.x, rect.y), (10, 3));

        let rect = dialog_rect(TriggerEvent::Click { column: 110, row: 1 }, 2, screen());
        assert_eq!((rect.x, rect.y), (64, 2));

        let rect = dialog_rect(TriggerEvent::Click { column: 0, row: 39 }, 2, screen());
        assert_eq!((rect.x, rect.y), (0, 32));
    }

    #[test]
    fn test_dialog_fits_tiny_screen() {
        let tiny = Rect::new(0, 0, 20, 5);
        let rect = dialog_rect(TriggerEvent::Key, 3, tiny);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));
    }
}
