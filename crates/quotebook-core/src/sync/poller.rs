//! Background sync timer
//!
//! The poller only produces ticks. The task that owns the session receives
//! them alongside user input and runs the sync cycle itself, so the quote
//! list always has a single writer.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// Commands sent to the poller task
#[derive(Debug)]
pub enum SyncCommand {
    /// Stop ticking
    Shutdown,
}

/// Events from the poller task
#[derive(Debug, PartialEq, Eq)]
pub enum SyncEvent {
    /// Time to run a sync cycle
    Tick,
}

/// Handle for controlling the poller task
pub struct PollerHandle {
    pub command_tx: mpsc::Sender<SyncCommand>,
    pub event_rx: mpsc::Receiver<SyncEvent>,
}

impl PollerHandle {
    /// Ask the poller to stop
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(SyncCommand::Shutdown).await;
    }
}

/// Spawn a task that emits a `Tick` every `interval`
pub fn spawn_sync_poller(interval: Duration) -> PollerHandle {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(64);

    tokio::spawn(sync_poller_task(interval, command_rx, event_tx));

    PollerHandle {
        command_tx,
        event_rx,
    }
}

async fn sync_poller_task(
    interval: Duration,
    mut command_rx: mpsc::Receiver<SyncCommand>,
    event_tx: mpsc::Sender<SyncEvent>,
) {
    debug!(?interval, "sync poller started");

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                if event_tx.send(SyncEvent::Tick).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
            cmd = command_rx.recv() => {
                if matches!(cmd, Some(SyncCommand::Shutdown) | None) {
                    break;
                }
            }
        }
    }

    debug!("sync poller stopped");
}
