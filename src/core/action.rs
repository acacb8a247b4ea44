//! Actions that modules and commands return to the app

use crate::domain::ProjectPayload;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Re-fetch the project list
    Refresh,

    /// Open the new project dialog
    NewProject,

    /// Toggle a side panel by id
    TogglePanel(String),

    /// Highlight a menu entry by name
    Goto(String),

    /// Confirm the open dialog with the form payload
    SubmitDialog(ProjectPayload),

    /// Dismiss the open dialog
    CancelDialog,

    /// Toggle the help popup
    Help,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}
