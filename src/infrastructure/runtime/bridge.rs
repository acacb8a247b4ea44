//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! This module provides a bridge between the synchronous TUI (ratatui) thread
//! and the asynchronous Tokio runtime that executes Projects API calls.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::domain::{ProjectPayload, ProjectRecord};
use crate::infrastructure::api::ProjectsApi;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    /// GET the project list
    FetchProjects,
    /// POST a new project
    CreateProject { payload: ProjectPayload },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    /// Project list fetched
    ProjectsLoaded { records: Vec<ProjectRecord> },
    /// Project list fetch failed
    FetchFailed { message: String },
    /// Project created; raw response body
    ProjectCreated { response: Value },
    /// Project creation failed
    CreateFailed { message: String },
    /// Worker-level error
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Create a new runtime bridge driving `api` on its own thread
    pub fn new(api: Arc<dyn ProjectsApi>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let rt = Runtime::new()?;

        // Spawn the worker thread with its own Tokio runtime
        thread::Builder::new()
            .name("id2-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(api, cmd_rx, evt_tx.clone()).await {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Wait up to `timeout` for a single event
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        // Try to send shutdown command
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
