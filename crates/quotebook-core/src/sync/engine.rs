//! Sync cycle state machine
//!
//! Each cycle moves `Idle -> Syncing -> Idle`: fetch the remote
//! collection, merge it into the session's store, and persist/re-render if
//! anything changed. A failed cycle is logged and leaves the store as it
//! was; the next tick simply tries again.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::client::RemoteSource;
use super::reconcile::MergeReport;
use crate::display::Surface;
use crate::session::Session;

/// Where the engine is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Waiting for the next tick
    Idle,
    /// Fetching and merging
    Syncing,
}

/// Runs sync cycles against one remote
pub struct SyncEngine<R: RemoteSource> {
    remote: R,
    state: SyncState,
    /// Result of the last successful cycle
    last_report: Option<MergeReport>,
    /// Failed cycles since startup
    failures: u64,
}

impl<R: RemoteSource> SyncEngine<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            state: SyncState::Idle,
            last_report: None,
            failures: 0,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn last_report(&self) -> Option<MergeReport> {
        self.last_report
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Run one fetch-and-merge cycle
    ///
    /// Errors are logged and returned; they never leave the store half
    /// merged because nothing is applied until the fetch succeeds.
    pub async fn run_cycle<S: Surface>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<MergeReport> {
        self.state = SyncState::Syncing;
        debug!("sync cycle started");

        let result = self.cycle(session).await;

        self.state = SyncState::Idle;
        match &result {
            Ok(report) => {
                self.last_report = Some(*report);
                debug!(?report, "sync cycle finished");
            }
            Err(e) => {
                self.failures += 1;
                warn!(error = %e, failures = self.failures, "sync cycle failed");
            }
        }

        result
    }

    async fn cycle<S: Surface>(&self, session: &mut Session<S>) -> Result<MergeReport> {
        let remote = self
            .remote
            .fetch()
            .await
            .context("Failed to fetch remote quotes")?;

        session
            .apply_remote(&remote)
            .context("Failed to apply remote quotes")
    }
}
