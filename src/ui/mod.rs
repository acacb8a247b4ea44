use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use serde_json::Value;

pub mod layout;

use crate::app::{App, Focus, InputMode, OpenDialog, StatusLevel};
use crate::domain::{display_label, NAV_PANEL};

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let areas = layout::areas(size, app.panels.is_open(NAV_PANEL));

    draw_header(f, areas.header, areas.new_button, app);
    if let Some(sidebar) = areas.sidebar {
        draw_sidebar(f, sidebar, app);
    }
    draw_list_panel(f, areas.list, app);
    draw_detail_panel(f, areas.details, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if let Some(dialog) = app.dialog.as_ref() {
        draw_dialog(f, areas.size, dialog);
    }
    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, button: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "ID2 Projects",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.base_url)),
        Span::styled("App", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.menu.selected().name)),
        Span::styled("Focus", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.focus_label())),
    ];
    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("  loading ({})", app.in_flight),
            Style::default().fg(Color::LightYellow),
        ));
    }

    let left_area = Rect {
        width: area.width.saturating_sub(button.width),
        ..area
    };
    let left = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(left, left_area);

    let new_button = Paragraph::new(Line::from(Span::styled(
        "+ New project",
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(new_button, button);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let selected = app.menu.selected_index();
    let items: Vec<ListItem> = app
        .menu
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == selected {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(format!("{} {}", item.glyph(), item.name))).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Menu")
                .border_style(border_style),
        )
        .highlight_symbol("-> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_list_panel(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = format!("Projects ({})", app.project_list.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if app.project_list.is_empty() {
        let empty = Paragraph::new("No projects yet. Press n to create one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .project_list
        .iter()
        .map(|record| ListItem::new(Line::from(display_label(record))))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_project));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Details {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let lines = match app.selected_record() {
        Some(record) => record_lines(record),
        None => vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Inspector")
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn record_lines(record: &crate::domain::ProjectRecord) -> Vec<Line<'static>> {
    record
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Line::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ])
        })
        .collect()
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Projects ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.project_list.len())),
    ];
    if let Some(alert) = app.alert.as_ref() {
        spans.push(Span::styled("Dialog ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(format!("{}  ", truncate_str(&alert.text(), 48))));
    }
    if let Some(response) = app.last_response.as_ref() {
        spans.push(Span::styled("Created ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(truncate_str(&response.to_string(), 48)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(": ", Style::default().fg(Color::Yellow)),
            Span::raw(app.command.input.clone()),
            Span::styled(
                "  refresh | new | panel [id] | goto <name> | help | quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Dialog => Line::from(Span::styled(
            "Tab next field  Enter next/create  Ctrl-s create  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            } else {
                Line::from(Span::styled(
                    "n new  r refresh  m menu  y copy  : command  ? help  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn draw_dialog(f: &mut Frame, size: Rect, dialog: &OpenDialog) {
    let form = &dialog.form;
    let area = layout::dialog_rect(dialog.controller.trigger(), form.fields.len(), size);
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from(Span::styled(
        form.template.clone(),
        Style::default().fg(Color::DarkGray),
    ))];
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focused;
        let label_style = if focused {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(field.name.clone(), label_style)));
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(format!("  {}{}", field.value, cursor)));
    }
    lines.push(Line::from(Span::styled(
        "Enter create  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title("New project")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightGreen)),
    );
    f.render_widget(paragraph, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  Tab        Cycle focus"),
        Line::from("  j / k      Move selection"),
        Line::from("  g / G      Top / bottom"),
        Line::from("  Mouse      Click to select"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  n          New project"),
        Line::from("  r          Refresh project list"),
        Line::from("  m          Toggle menu panel"),
        Line::from("  y          Copy selected record as JSON"),
        Line::from("  :          Command line"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let head: String = value.chars().take(max.saturating_sub(1)).collect();
    format!("{head}…")
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
