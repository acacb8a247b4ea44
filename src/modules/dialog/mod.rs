//! Modal dialog lifecycle
//!
//! A [`DialogController`] governs exactly one modal: it starts open and ends
//! either confirmed with a payload or cancelled. Both transitions consume the
//! controller. The paired [`DialogHandle`] receives the outcome through a
//! one-shot channel, so the owner of the handle never needs a reference to
//! the dialog itself.

mod form;

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::domain::ProjectPayload;

pub use form::{FormField, ProjectForm};

/// What opened a dialog; used to anchor the popup on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Opened from the keyboard or the command line
    Key,
    /// Opened by a mouse click at a terminal cell
    Click { column: u16, row: u16 },
}

/// Terminal state of a dialog
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult {
    Confirmed(ProjectPayload),
    Cancelled,
}

/// Owner side of an open dialog
#[derive(Debug)]
pub struct DialogController {
    trigger: TriggerEvent,
    resolve: Option<oneshot::Sender<DialogResult>>,
}

impl DialogController {
    /// Open a dialog anchored to `trigger`
    pub fn open(trigger: TriggerEvent) -> (Self, DialogHandle) {
        let (tx, rx) = oneshot::channel();
        let controller = Self {
            trigger,
            resolve: Some(tx),
        };
        (controller, DialogHandle { rx })
    }

    pub fn trigger(&self) -> TriggerEvent {
        self.trigger
    }

    /// Close the dialog, resolving the handle with `data`
    pub fn confirm(mut self, data: ProjectPayload) {
        self.close(DialogResult::Confirmed(data));
    }

    /// Close the dialog without a payload
    pub fn dismiss(mut self) {
        self.close(DialogResult::Cancelled);
    }

    fn close(&mut self, result: DialogResult) {
        if let Some(tx) = self.resolve.take() {
            // The handle may already be gone; nobody is waiting then.
            let _ = tx.send(result);
        }
    }
}

impl Drop for DialogController {
    fn drop(&mut self) {
        self.close(DialogResult::Cancelled);
    }
}

/// Waiting side of a dialog
#[derive(Debug)]
pub struct DialogHandle {
    rx: oneshot::Receiver<DialogResult>,
}

impl DialogHandle {
    /// Non-blocking check for the outcome
    pub fn try_outcome(&mut self) -> Option<DialogResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(DialogResult::Cancelled),
        }
    }

    /// Wait for the dialog to close
    pub async fn outcome(self) -> DialogResult {
        self.rx.await.unwrap_or(DialogResult::Cancelled)
    }
}
