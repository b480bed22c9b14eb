//! Session coordinator
//!
//! A `Session` owns everything one front end needs: the quote store, the
//! session-scoped slots, the conflict policy, and the `Surface` that
//! renders. Every user action and every sync cycle goes through it, so
//! there is exactly one writer for the quote list.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::categories;
use crate::codec;
use crate::config::Config;
use crate::display::{self, Pick, Surface};
use crate::error::QuoteResult;
use crate::models::{ImportedQuote, Quote, RemoteQuote};
use crate::storage::{MemorySlots, SlotStore};
use crate::store::QuoteStore;
use crate::sync::{merge, ConflictPolicy, MergeReport};

/// One front end's view of the quote collection
pub struct Session<S: Surface> {
    store: QuoteStore,
    session_slots: MemorySlots,
    surface: S,
    policy: ConflictPolicy,
}

impl<S: Surface> Session<S> {
    /// Create a session around an already loaded store
    pub fn new(store: QuoteStore, surface: S) -> Self {
        Self {
            store,
            session_slots: MemorySlots::new(),
            surface,
            policy: ConflictPolicy::default(),
        }
    }

    /// Open the store from configuration and wrap it in a session
    pub fn open(config: &Config, surface: S) -> Result<Self> {
        let store = QuoteStore::open(config).context("Failed to open quote store")?;
        Ok(Self::new(store, surface).with_policy(config.conflict_policy))
    }

    /// Set the sync conflict policy
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Session-scoped slots (last shown index)
    pub fn session_slots(&self) -> &dyn SlotStore {
        &self.session_slots
    }

    /// The persisted category filter
    pub fn selected_category(&self) -> String {
        categories::selected(self.store.slots())
    }

    // ==================== Display ====================

    /// Recompute the category list and show it
    pub fn populate_categories(&self) -> Vec<String> {
        let categories = categories::categories(&self.store);
        self.surface
            .show_categories(&categories, &self.selected_category());
        categories
    }

    /// Pick a random quote in the selected category and show it
    pub fn render(&mut self) -> QuoteResult<Pick> {
        let category = self.selected_category();
        let pick = display::pick(
            &self.store,
            &category,
            &self.session_slots,
            &mut rand::thread_rng(),
        )?;
        display::render(&self.surface, &pick);
        Ok(pick)
    }

    /// Show a new random quote ("new quote" button)
    pub fn new_quote(&mut self) -> QuoteResult<Pick> {
        self.render()
    }

    /// Show the quote that was last shown this session, if it still exists
    pub fn show_last(&self) -> Option<Quote> {
        let category = self.selected_category();
        let quote = display::last_shown(&self.store, &category, &self.session_slots);
        match &quote {
            Some(quote) => self.surface.show_quote(quote),
            None => self.surface.notify("No quote shown yet this session."),
        }
        quote
    }

    // ==================== User actions ====================

    /// Add a quote, then refresh categories and re-render
    ///
    /// Empty fields are reported to the surface and nothing changes. Other
    /// failures are returned to the caller.
    pub fn add_quote(&mut self, text: &str, category: &str) -> QuoteResult<Quote> {
        let quote = self.store.add(text, category).inspect_err(|e| {
            if e.is_user_error() {
                self.surface.report_error(&e.to_string());
            }
        })?;

        self.populate_categories();
        self.render()?;
        Ok(quote)
    }

    /// Change the category filter and show a quote from it
    pub fn filter_quotes(&mut self, category: &str) -> QuoteResult<Pick> {
        categories::select(self.store.slots(), category)?;
        debug!(category, "category selected");
        self.render()
    }

    /// Import a JSON document into the store
    ///
    /// Invalid input is reported and leaves the store unchanged.
    pub fn import_json(&mut self, raw: &str) -> QuoteResult<usize> {
        let records = codec::import(raw).inspect_err(|e| {
            self.surface.report_error(&e.to_string());
        })?;
        self.ingest(records)
    }

    /// Import a JSON file into the store
    ///
    /// Invalid content is reported like `import_json`; an unreadable file
    /// is returned to the caller.
    pub fn import_file(&mut self, path: &Path) -> QuoteResult<usize> {
        let records = codec::import_file(path).inspect_err(|e| {
            if e.is_user_error() {
                self.surface.report_error(&e.to_string());
            }
        })?;
        self.ingest(records)
    }

    fn ingest(&mut self, records: Vec<ImportedQuote>) -> QuoteResult<usize> {
        let count = self.store.import_many(records)?;
        self.populate_categories();
        self.surface.notify("Quotes imported successfully!");
        Ok(count)
    }

    /// The export document for the current quotes
    pub fn export_json(&self) -> QuoteResult<String> {
        codec::export(self.store.all())
    }

    /// Write the export document to a file
    pub fn export_to_file(&self, path: &Path) -> QuoteResult<()> {
        codec::export_to_file(self.store.all(), path)?;
        self.surface
            .notify(&format!("Exported {} quotes to {}", self.store.len(), path.display()));
        Ok(())
    }

    // ==================== Sync ====================

    /// Merge remote quotes into the store
    ///
    /// When anything changed, the store is persisted, categories are
    /// refreshed, and a quote is re-rendered. Otherwise nothing else
    /// happens. If the save fails the merge is rolled back, so the next
    /// cycle sees the same changes again.
    pub fn apply_remote(&mut self, remote: &[RemoteQuote]) -> QuoteResult<MergeReport> {
        let before = self.store.all().to_vec();
        let report = merge(&mut self.store, remote, self.policy);

        if report.changed() {
            if let Err(e) = self.store.persist() {
                self.store.restore(before);
                return Err(e);
            }
            self.populate_categories();
            self.render()?;
            self.surface.notify("Quotes synced with server");
            info!(
                added = report.added,
                updated = report.updated,
                "applied remote quotes"
            );
        } else {
            debug!("remote quotes already up to date");
        }

        Ok(report)
    }
}
