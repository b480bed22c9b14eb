//! Quote selection and display
//!
//! Picks a random quote from the filtered view and hands it to whatever
//! surface is rendering. The position of the last pick is remembered in
//! the session slots.

use rand::Rng;

use crate::models::Quote;
use crate::storage::{read_json, write_json, SlotStore, StorageResult, SLOT_LAST_QUOTE_INDEX};
use crate::store::QuoteStore;

/// Result of picking a quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// A quote was chosen; `index` is its position in the filtered view
    Quote { index: usize, quote: Quote },
    /// The category has no quotes
    Empty { category: String },
}

impl Pick {
    /// The chosen quote, if any
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Pick::Quote { quote, .. } => Some(quote),
            Pick::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Pick::Empty { .. })
    }
}

/// Where quotes, categories, and messages are shown
///
/// Implemented by the front end (terminal output in the CLI).
pub trait Surface {
    /// Show a single quote
    fn show_quote(&self, quote: &Quote);

    /// Show that a category has nothing to display
    fn show_empty(&self, category: &str);

    /// Show the category list with the current selection
    fn show_categories(&self, categories: &[String], selected: &str);

    /// Tell the user something happened
    fn notify(&self, message: &str);

    /// Tell the user something went wrong
    fn report_error(&self, message: &str);
}

/// Pick a random quote in `category` and remember its position
pub fn pick<R: Rng>(
    store: &QuoteStore,
    category: &str,
    session: &dyn SlotStore,
    rng: &mut R,
) -> StorageResult<Pick> {
    let filtered = store.filter(category);
    if filtered.is_empty() {
        return Ok(Pick::Empty {
            category: category.to_string(),
        });
    }

    let index = rng.gen_range(0..filtered.len());
    write_json(session, SLOT_LAST_QUOTE_INDEX, &index)?;

    Ok(Pick::Quote {
        index,
        quote: filtered[index].clone(),
    })
}

/// The last shown quote, resolved against the current filtered view
///
/// Returns `None` when nothing was shown this session or the remembered
/// position no longer exists.
pub fn last_shown(store: &QuoteStore, category: &str, session: &dyn SlotStore) -> Option<Quote> {
    let index: usize = read_json(session, SLOT_LAST_QUOTE_INDEX).ok().flatten()?;
    store.filter(category).get(index).map(|q| (*q).clone())
}

/// Send a pick to a surface
pub fn render(surface: &impl Surface, pick: &Pick) {
    match pick {
        Pick::Quote { quote, .. } => surface.show_quote(quote),
        Pick::Empty { category } => surface.show_empty(category),
    }
}
