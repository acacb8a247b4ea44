//! Async worker - runs in Tokio runtime and executes Projects API calls

use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::infrastructure::api::ProjectsApi;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop
///
/// Every request runs as its own task: a fetch and a create may be in flight
/// at once, and events are sent in completion order.
pub async fn run_async_worker(
    api: Arc<dyn ProjectsApi>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => return Ok(()),

            RuntimeCommand::FetchProjects => {
                let api = api.clone();
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let event = match api.list_projects().await {
                        Ok(records) => {
                            tracing::debug!(count = records.len(), "project list fetched");
                            RuntimeEvent::ProjectsLoaded { records }
                        }
                        Err(err) => RuntimeEvent::FetchFailed {
                            message: err.to_string(),
                        },
                    };
                    let _ = evt_tx.send(event);
                });
            }

            RuntimeCommand::CreateProject { payload } => {
                let api = api.clone();
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let event = match api.create_project(&payload).await {
                        Ok(response) => RuntimeEvent::ProjectCreated { response },
                        Err(err) => RuntimeEvent::CreateFailed {
                            message: err.to_string(),
                        },
                    };
                    let _ = evt_tx.send(event);
                });
            }
        }
    }

    // All senders dropped
    Ok(())
}
