//! Quote store
//!
//! The `QuoteStore` owns the ordered quote list and writes it back to the
//! `quotes` slot after every mutation.
//!
//! ## Startup
//!
//! The list is loaded from the durable slot. When the slot is missing or
//! cannot be parsed, the store starts from the built-in defaults instead.
//! A slot that fails to parse is backed up first so it is not silently
//! overwritten by the next save.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = QuoteStore::open(&config)?;
//!
//! let quote = store.add("Stay hungry, stay foolish.", "Life")?;
//! assert!(store.get(quote.id).is_some());
//! ```

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{QuoteError, QuoteResult};
use crate::ids::IdGenerator;
use crate::models::{default_quotes, ImportedQuote, Quote};
use crate::storage::{read_json, write_json, FileSlots, SlotStore, StorageError, SLOT_QUOTES};

/// Ordered, persisted collection of quotes
pub struct QuoteStore {
    /// Quotes in insertion order
    quotes: Vec<Quote>,
    /// Durable slots (quotes, last category)
    slots: Box<dyn SlotStore>,
    /// ID source for new and imported quotes
    ids: IdGenerator,
    /// True when the list came from the built-in defaults
    seeded: bool,
}

impl QuoteStore {
    /// Open the store in the configured data directory
    pub fn open(config: &Config) -> Result<Self> {
        let slots = FileSlots::new(config.data_dir.clone());
        Self::load(Box::new(slots)).context("Failed to load quotes")
    }

    /// Load the quote list from the given slots
    ///
    /// Falls back to the default quotes when nothing is persisted or the
    /// persisted value does not parse. I/O failures are returned.
    pub fn load(slots: Box<dyn SlotStore>) -> QuoteResult<Self> {
        let (quotes, seeded) = match read_json::<Vec<Quote>>(slots.as_ref(), SLOT_QUOTES) {
            Ok(Some(quotes)) => {
                debug!(count = quotes.len(), "loaded quotes");
                (quotes, false)
            }
            Ok(None) => {
                info!("no saved quotes, starting from defaults");
                (default_quotes(), true)
            }
            Err(StorageError::InvalidFormat { details, .. }) => {
                let backup = slots.backup(SLOT_QUOTES)?;
                warn!(%details, ?backup, "saved quotes are unreadable, starting from defaults");
                (default_quotes(), true)
            }
            Err(e) => return Err(e.into()),
        };

        let ids = IdGenerator::seeded(quotes.iter().map(|q| q.id));

        Ok(Self {
            quotes,
            slots,
            ids,
            seeded,
        })
    }

    /// The durable slots backing this store
    pub fn slots(&self) -> &dyn SlotStore {
        self.slots.as_ref()
    }

    /// Whether the list was seeded from defaults (nothing persisted yet)
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    // ==================== Mutations ====================

    /// Add a new quote
    ///
    /// Both fields are trimmed; an empty field is rejected and nothing
    /// changes.
    pub fn add(&mut self, text: &str, category: &str) -> QuoteResult<Quote> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(QuoteError::EmptyText);
        }
        if category.is_empty() {
            return Err(QuoteError::EmptyCategory);
        }

        let quote = Quote::new(self.fresh_id()?, text, category);
        self.quotes.push(quote.clone());
        if let Err(e) = self.persist() {
            self.quotes.pop();
            return Err(e);
        }

        info!(id = quote.id, category = %quote.category, "added quote");
        Ok(quote)
    }

    /// Append imported quotes wholesale
    ///
    /// Records without an ID get a fresh one. Existing IDs are kept as-is,
    /// even if they duplicate one already in the store. Returns the number
    /// of quotes appended.
    pub fn import_many(&mut self, records: Vec<ImportedQuote>) -> QuoteResult<usize> {
        // Observe supplied IDs first so generated ones land above them
        for id in records.iter().filter_map(|r| r.id) {
            self.ids.observe(id);
        }

        // Assign every ID before touching the list
        let mut imported = Vec::with_capacity(records.len());
        for record in records {
            let id = match record.id {
                Some(id) => id,
                None => self.fresh_id()?,
            };
            imported.push(Quote::new(id, record.text, record.category));
        }

        let count = imported.len();
        let len_before = self.quotes.len();
        self.quotes.extend(imported);

        if let Err(e) = self.persist() {
            self.quotes.truncate(len_before);
            return Err(e);
        }
        info!(count, "imported quotes");
        Ok(count)
    }

    /// Append a quote that already has an ID (sync merge)
    ///
    /// Does not persist; call `persist()` once the batch is done.
    pub fn append(&mut self, quote: Quote) {
        self.ids.observe(quote.id);
        self.quotes.push(quote);
    }

    /// Replace the text of the quote with the given ID (sync merge)
    ///
    /// Returns `false` when no quote has that ID. Does not persist.
    pub fn set_text(&mut self, id: u64, text: &str) -> bool {
        match self.quotes.iter_mut().find(|q| q.id == id) {
            Some(quote) => {
                quote.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Replace the whole list without persisting
    ///
    /// Used to roll back a merge whose save failed.
    pub(crate) fn restore(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    fn fresh_id(&mut self) -> QuoteResult<u64> {
        self.ids.next_id().ok_or_else(|| QuoteError::IdsExhausted {
            max: self.quotes.iter().map(|q| q.id).max().unwrap_or(u64::MAX),
        })
    }

    /// Write the full list to the `quotes` slot
    pub fn persist(&mut self) -> QuoteResult<()> {
        write_json(self.slots.as_ref(), SLOT_QUOTES, &self.quotes)?;
        self.seeded = false;
        Ok(())
    }

    // ==================== Queries ====================

    /// Get a quote by ID
    pub fn get(&self, id: u64) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// All quotes in insertion order
    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }

    /// Quotes in a category, or all quotes for the `all` sentinel
    pub fn filter(&self, category: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| q.matches_category(category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
