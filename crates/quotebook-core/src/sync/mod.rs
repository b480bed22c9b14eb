//! Remote quote sync
//!
//! Polls a remote HTTP endpoint and merges its quotes into the local store.
//!
//! ## Cycle
//!
//! 1. A poller tick arrives (or the user asks for a sync)
//! 2. `GET` the remote collection
//! 3. Append quotes with unknown IDs; resolve differing text by policy
//! 4. If anything changed: persist, refresh categories, re-render
//!
//! ## Usage
//!
//! ```ignore
//! let remote = HttpRemote::new(url, config.sync_timeout())?;
//! let mut engine = SyncEngine::new(remote);
//! engine.run_cycle(&mut session).await?;
//! ```

mod client;
mod engine;
mod reconcile;
mod poller;

pub use client::{push_and_log, HttpRemote, RemoteSource};
pub use engine::{SyncEngine, SyncState};
pub use reconcile::{merge, ConflictPolicy, MergeReport};
pub use poller::{spawn_sync_poller, PollerHandle, SyncCommand, SyncEvent};
