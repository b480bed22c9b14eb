//! Category index
//!
//! Categories are derived from the store on every call, so they always
//! reflect the current quote list. The selected category is kept in the
//! durable `lastCategory` slot.

use crate::models::ALL_CATEGORY;
use crate::storage::{read_json, write_json, SlotStore, StorageResult, SLOT_LAST_CATEGORY};
use crate::store::QuoteStore;

/// Distinct categories in first-seen order, with `all` first
pub fn categories(store: &QuoteStore) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORY.to_string()];
    for quote in store.all() {
        if !categories.iter().any(|c| c == &quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// The persisted category filter, defaulting to `all`
///
/// An unreadable slot also reads as `all`.
pub fn selected(slots: &dyn SlotStore) -> String {
    read_json::<String>(slots, SLOT_LAST_CATEGORY)
        .ok()
        .flatten()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| ALL_CATEGORY.to_string())
}

/// Persist the category filter
///
/// Takes effect on the next render.
pub fn select(slots: &dyn SlotStore, category: &str) -> StorageResult<()> {
    write_json(slots, SLOT_LAST_CATEGORY, &category.trim())
}
