use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use id2_projects::app::{pump_background, App, Focus, InputMode, StatusLevel};
use id2_projects::config;
use id2_projects::domain::NAV_PANEL;
use id2_projects::infrastructure::api::ProjectsClient;
use id2_projects::infrastructure::logging;
use id2_projects::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use id2_projects::modules::dialog::TriggerEvent;
use id2_projects::ui;
use id2_projects::ui::layout::{rect_contains, rect_inner};

#[derive(Debug, Parser)]
#[command(
    name = "id2-projects",
    version,
    about = "Terminal client for the ID2 Projects API"
)]
struct Args {
    /// Base URL of the ID2 server (e.g. http://localhost:8000)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file (default: ~/.config/id2-projects/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    if let Some(base_url) = args.base_url.as_deref() {
        config.base_url = base_url.to_string();
    }
    config.base_url = config::normalize_base_url(&config.base_url);

    let log_path = args
        .log_file
        .clone()
        .or_else(|| config.log_file.as_deref().map(PathBuf::from))
        .or_else(config::default_log_path);
    if let Some(path) = log_path {
        if let Err(err) = logging::init(&path) {
            eprintln!("Logging disabled: {err:#}");
        }
    }

    let client = ProjectsClient::new(&config.base_url)?.with_cookies(&config.cookie_pairs());
    let runtime = RuntimeBridge::new(Arc::new(client))?;
    let app = App::init(&config);
    tracing::info!(base_url = %config.base_url, "starting");

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Dialog => app.handle_dialog_key(key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.help_open = true,
        (KeyCode::Char(':') | KeyCode::Char('/'), _) => app.enter_command(),
        (KeyCode::Char('n'), _) => app.open_new_project_dialog(TriggerEvent::Key),
        (KeyCode::Char('r'), _) => app.refresh_project_list(),
        (KeyCode::Char('m'), _) => app.toggle_side_panel(NAV_PANEL),
        (KeyCode::Char('y'), _) => handle_copy_to_clipboard(app),
        (KeyCode::Char('g'), _) => app.go_to_top(),
        (KeyCode::Char('G'), _) => app.go_to_bottom(),
        (KeyCode::Tab, _) => app.cycle_focus(),
        (KeyCode::Up | KeyCode::Char('k'), _) => app.move_selection_up(),
        (KeyCode::Down | KeyCode::Char('j'), _) => app.move_selection_down(),
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.input_mode != InputMode::Normal {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size, app.panels.is_open(NAV_PANEL));
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if rect_contains(areas.new_button, col, row) {
                app.open_new_project_dialog(TriggerEvent::Click { column: col, row });
                return;
            }
            if let Some(sidebar) = areas.sidebar {
                let inner = rect_inner(sidebar);
                if rect_contains(inner, col, row) {
                    if let Some(item) = app.menu.items().get((row - inner.y) as usize) {
                        app.goto(item.name);
                    }
                    app.focus = Focus::Sidebar;
                    return;
                }
            }
            let inner = rect_inner(areas.list);
            if rect_contains(inner, col, row) {
                app.set_list_selection((row - inner.y) as usize);
                app.focus = Focus::List;
            }
        }
        MouseEventKind::ScrollUp => app.move_selection_up(),
        MouseEventKind::ScrollDown => app.move_selection_down(),
        _ => {}
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(record) = app.selected_record() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };
    let text = match serde_json::to_string_pretty(record) {
        Ok(text) => text,
        Err(err) => {
            app.set_status(format!("Copy failed: {err}"), StatusLevel::Error);
            return;
        }
    };

    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.set_status("Copied record JSON", StatusLevel::Info),
        Err(err) => {
            tracing::warn!(error = %err, "clipboard unavailable");
            app.set_status(format!("Clipboard unavailable: {err}"), StatusLevel::Error);
        }
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
