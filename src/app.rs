use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::Config;
use crate::core::{Action, Command, Module, NotifyLevel};
use crate::domain::{Menu, ProjectPayload, ProjectRecord, SidePanels, NAV_PANEL};
use crate::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use crate::modules::dialog::{DialogController, DialogHandle, DialogResult, ProjectForm, TriggerEvent};

pub const CANCELLED_NOTICE: &str = "You cancelled the dialog.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
    Details,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

/// Last dialog outcome, kept for transient display
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Submitted(ProjectPayload),
    Cancelled,
}

impl Alert {
    pub fn text(&self) -> String {
        match self {
            Alert::Submitted(payload) => Value::Object(payload.clone()).to_string(),
            Alert::Cancelled => CANCELLED_NOTICE.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// The new project modal while it is on screen
#[derive(Debug)]
pub struct OpenDialog {
    pub controller: DialogController,
    pub form: ProjectForm,
}

#[derive(Debug)]
pub struct App {
    /// Most recent successful fetch, in server order
    pub project_list: Vec<ProjectRecord>,
    pub alert: Option<Alert>,
    /// Fixed navigation menu; `menu.selected()` is the highlighted entry
    pub menu: Menu,
    pub panels: SidePanels,
    pub dialog: Option<OpenDialog>,
    dialog_handle: Option<DialogHandle>,
    /// Raw body of the last successful create
    pub last_response: Option<Value>,
    pub selected_project: usize,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub base_url: String,
    pub dialog_template: String,
    pub dialog_fields: Vec<String>,
    pub help_open: bool,
    pub should_quit: bool,
    /// Requests sent to the runtime and not yet completed
    pub in_flight: usize,
    pending_fetches: usize,
    pending_creates: Vec<ProjectPayload>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            project_list: Vec::new(),
            alert: None,
            menu: Menu::new(),
            panels: SidePanels::with_open([NAV_PANEL]),
            dialog: None,
            dialog_handle: None,
            last_response: None,
            selected_project: 0,
            focus: Focus::List,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            base_url: config.base_url.clone(),
            dialog_template: config.dialog.template.clone(),
            dialog_fields: config.dialog_fields(),
            help_open: false,
            should_quit: false,
            in_flight: 0,
            pending_fetches: 0,
            pending_creates: Vec::new(),
        }
    }

    /// Build the view state and queue the initial list fetch. Called once by
    /// the host before the first frame.
    pub fn init(config: &Config) -> Self {
        let mut app = Self::new(config);
        app.refresh_project_list();
        app
    }

    // === Controller operations ===

    pub fn toggle_side_panel(&mut self, panel_id: &str) {
        let open = self.panels.toggle(panel_id);
        tracing::debug!(panel = panel_id, open, "side panel toggled");
        if panel_id == NAV_PANEL && !open && self.focus == Focus::Sidebar {
            self.focus = Focus::List;
        }
    }

    /// Queue a GET of the project list
    pub fn refresh_project_list(&mut self) {
        self.pending_fetches += 1;
    }

    /// Open the creation dialog; a second open while one is showing is ignored
    pub fn open_new_project_dialog(&mut self, trigger: TriggerEvent) {
        if self.dialog.is_some() {
            return;
        }
        let (controller, handle) = DialogController::open(trigger);
        let form = ProjectForm::new(self.dialog_template.clone(), &self.dialog_fields);
        self.dialog = Some(OpenDialog { controller, form });
        self.dialog_handle = Some(handle);
        self.input_mode = InputMode::Dialog;
    }

    pub fn confirm_dialog(&mut self, data: ProjectPayload) {
        if let Some(dialog) = self.close_dialog() {
            dialog.controller.confirm(data);
        }
        self.poll_dialog();
    }

    pub fn dismiss_dialog(&mut self) {
        if let Some(dialog) = self.close_dialog() {
            dialog.controller.dismiss();
        }
        self.poll_dialog();
    }

    /// Consume the dialog outcome once it is available
    pub fn poll_dialog(&mut self) {
        let Some(handle) = self.dialog_handle.as_mut() else {
            return;
        };
        let Some(result) = handle.try_outcome() else {
            return;
        };
        self.dialog_handle = None;

        match result {
            DialogResult::Confirmed(data) => {
                let body = Value::Object(data.clone());
                tracing::info!(payload = %body, "submitting new project");
                self.pending_creates.push(data.clone());
                self.alert = Some(Alert::Submitted(data));
            }
            DialogResult::Cancelled => {
                self.alert = Some(Alert::Cancelled);
                self.set_status(CANCELLED_NOTICE, StatusLevel::Info);
            }
        }
    }

    /// Highlight a menu entry
    pub fn goto(&mut self, name: &str) {
        if self.menu.select_by_name(name) {
            self.announce_menu();
        } else {
            self.set_status(format!("Unknown menu entry: {name}"), StatusLevel::Warn);
        }
    }

    fn announce_menu(&self) {
        tracing::info!("going to {}", self.menu.selected().name);
    }

    fn close_dialog(&mut self) -> Option<OpenDialog> {
        let dialog = self.dialog.take()?;
        self.input_mode = InputMode::Normal;
        self.focus = Focus::List;
        Some(dialog)
    }

    // === Runtime plumbing ===

    /// Number of list fetches to send; resets the counter
    pub fn take_fetch_requests(&mut self) -> usize {
        let count = std::mem::take(&mut self.pending_fetches);
        self.in_flight += count;
        count
    }

    /// Creation payloads to send, in confirmation order
    pub fn take_create_requests(&mut self) -> Vec<ProjectPayload> {
        let creates = std::mem::take(&mut self.pending_creates);
        self.in_flight += creates.len();
        creates
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::ProjectsLoaded { records } => self.apply_projects_loaded(records),
            RuntimeEvent::FetchFailed { message } => self.apply_fetch_failed(message),
            RuntimeEvent::ProjectCreated { response } => self.apply_project_created(response),
            RuntimeEvent::CreateFailed { message } => self.apply_create_failed(message),
            RuntimeEvent::Error { message } => self.apply_runtime_error(message),
        }
    }

    pub fn apply_projects_loaded(&mut self, records: Vec<ProjectRecord>) {
        self.complete_request();
        self.project_list = records;
        self.clamp_selection();
    }

    pub fn apply_fetch_failed(&mut self, message: String) {
        self.complete_request();
        tracing::warn!(error = %message, "project list fetch failed");
    }

    pub fn apply_project_created(&mut self, response: Value) {
        self.complete_request();
        tracing::info!(response = %response, "project created");
        self.last_response = Some(response);
        self.refresh_project_list();
    }

    pub fn apply_create_failed(&mut self, message: String) {
        self.complete_request();
        tracing::warn!(error = %message, "project creation failed");
    }

    pub fn apply_runtime_error(&mut self, message: String) {
        tracing::error!(error = %message, "runtime error");
        self.set_status(message, StatusLevel::Error);
    }

    fn complete_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    // === Status ===

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
        self.poll_dialog();
        self.clamp_selection();
    }

    pub fn focus_label(&self) -> &'static str {
        match self.focus {
            Focus::Sidebar => "Menu",
            Focus::List => "Projects",
            Focus::Details => "Inspector",
            Focus::Command => "Command",
        }
    }

    pub fn cycle_focus(&mut self) {
        let nav_open = self.panels.is_open(NAV_PANEL);
        self.focus = match self.focus {
            Focus::Sidebar => Focus::List,
            Focus::List => Focus::Details,
            Focus::Details | Focus::Command if nav_open => Focus::Sidebar,
            Focus::Details | Focus::Command => Focus::List,
        };
    }

    // === Selection ===

    pub fn selected_record(&self) -> Option<&ProjectRecord> {
        self.project_list.get(self.selected_project)
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.menu.cycle(false);
                self.announce_menu();
            }
            _ => self.selected_project = self.selected_project.saturating_sub(1),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.menu.cycle(true);
                self.announce_menu();
            }
            _ => {
                if self.selected_project + 1 < self.project_list.len() {
                    self.selected_project += 1;
                }
            }
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected_project = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_project = self.project_list.len().saturating_sub(1);
    }

    pub fn set_list_selection(&mut self, selection: usize) {
        self.selected_project = selection;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.project_list.is_empty() {
            self.selected_project = 0;
        } else if self.selected_project >= self.project_list.len() {
            self.selected_project = self.project_list.len() - 1;
        }
    }

    // === Command line ===

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.focus = Focus::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::List;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }

        let cmd = crate::core::parse_command(&input);
        self.exit_command();
        if !matches!(cmd, Command::Unknown(_)) {
            self.command.last = Some(input);
        }
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Refresh => Action::Refresh,
            Command::New => Action::NewProject,
            Command::Panel(id) => Action::TogglePanel(id.clone()),
            Command::Goto(name) => Action::Goto(name.clone()),
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
            Command::Unknown(raw) => {
                Action::Notify(format!("Unknown command: {raw}"), NotifyLevel::Error)
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::Refresh => self.refresh_project_list(),
            Action::NewProject => self.open_new_project_dialog(TriggerEvent::Key),
            Action::TogglePanel(id) => self.toggle_side_panel(&id),
            Action::Goto(name) => self.goto(&name),
            Action::SubmitDialog(data) => self.confirm_dialog(data),
            Action::CancelDialog => self.dismiss_dialog(),
            Action::Help => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Route a key to the open dialog's form
    pub fn handle_dialog_key(&mut self, key: crossterm::event::KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let action = dialog.form.handle_key(key);
        self.apply_action(action);
    }
}

/// Apply finished requests, then hand queued requests to the runtime
pub fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }
    app.poll_dialog();

    for _ in 0..app.take_fetch_requests() {
        if let Err(err) = runtime.send(RuntimeCommand::FetchProjects) {
            app.apply_fetch_failed(err.to_string());
        }
    }
    for payload in app.take_create_requests() {
        if let Err(err) = runtime.send(RuntimeCommand::CreateProject { payload }) {
            app.apply_create_failed(err.to_string());
        }
    }
}
