//! Reconciling remote quotes with the local store

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::RemoteQuote;
use crate::store::QuoteStore;

/// Which side wins when a remote quote's text differs from the local one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Overwrite local text with the remote value
    #[default]
    RemoteWins,
    /// Keep local text; only new remote quotes are added
    LocalWins,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::RemoteWins => write!(f, "remote-wins"),
            ConflictPolicy::LocalWins => write!(f, "local-wins"),
        }
    }
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote-wins" => Ok(ConflictPolicy::RemoteWins),
            "local-wins" => Ok(ConflictPolicy::LocalWins),
            other => Err(format!(
                "Unknown conflict policy '{}'. Use 'remote-wins' or 'local-wins'.",
                other
            )),
        }
    }
}

/// What a merge did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Remote quotes appended to the store
    pub added: usize,
    /// Local quotes whose text was overwritten
    pub updated: usize,
    /// Local quotes whose differing text was kept (local-wins)
    pub kept: usize,
    /// Remote records ignored because they had no text
    pub skipped: usize,
}

impl MergeReport {
    /// Whether the store was modified
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Merge remote quotes into the store by ID
///
/// Unknown IDs are appended. Known IDs with different text are resolved
/// by `policy`. The store is not persisted here.
pub fn merge(store: &mut QuoteStore, remote: &[RemoteQuote], policy: ConflictPolicy) -> MergeReport {
    let mut report = MergeReport::default();

    for record in remote {
        let Some(text) = record.content() else {
            debug!(id = record.id, "skipping remote quote without text");
            report.skipped += 1;
            continue;
        };

        let local_text = store.get(record.id).map(|q| q.text.clone());
        match local_text {
            None => {
                if let Some(quote) = record.to_quote() {
                    store.append(quote);
                    report.added += 1;
                }
            }
            Some(local) if local != text => match policy {
                ConflictPolicy::RemoteWins => {
                    store.set_text(record.id, text);
                    report.updated += 1;
                }
                ConflictPolicy::LocalWins => {
                    report.kept += 1;
                }
            },
            Some(_) => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use crate::storage::{MemorySlots, SlotStore, SLOT_QUOTES};

    fn store_with(quotes: Vec<Quote>) -> QuoteStore {
        let slots = MemorySlots::new();
        slots
            .write(SLOT_QUOTES, &serde_json::to_string(&quotes).unwrap())
            .unwrap();
        QuoteStore::load(Box::new(slots)).unwrap()
    }

    fn remote(id: u64, title: &str, category: Option<&str>) -> RemoteQuote {
        RemoteQuote {
            id,
            title: Some(title.to_string()),
            text: None,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_merge_example() {
        let mut store = store_with(vec![Quote::new(1, "A", "X")]);
        let incoming = vec![remote(1, "A2", None), remote(2, "B", Some("Y"))];

        let report = merge(&mut store, &incoming, ConflictPolicy::RemoteWins);

        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(
            store.all(),
            &[Quote::new(1, "A2", "X"), Quote::new(2, "B", "Y")]
        );
    }

    #[test]
    fn test_second_merge_is_a_no_op() {
        let mut store = store_with(vec![Quote::new(1, "A", "X")]);
        let incoming = vec![remote(1, "A2", None), remote(2, "B", Some("Y"))];

        assert!(merge(&mut store, &incoming, ConflictPolicy::RemoteWins).changed());
        let snapshot = store.all().to_vec();

        let report = merge(&mut store, &incoming, ConflictPolicy::RemoteWins);
        assert!(!report.changed());
        assert_eq!(store.all(), snapshot.as_slice());
    }

    #[test]
    fn test_missing_category_becomes_uncategorized() {
        let mut store = store_with(vec![]);
        merge(
            &mut store,
            &[remote(9, "No category", None)],
            ConflictPolicy::RemoteWins,
        );
        assert_eq!(store.get(9).unwrap().category, "Uncategorized");
    }

    #[test]
    fn test_local_wins_keeps_text() {
        let mut store = store_with(vec![Quote::new(1, "Mine", "X")]);
        let report = merge(
            &mut store,
            &[remote(1, "Theirs", None), remote(2, "New", None)],
            ConflictPolicy::LocalWins,
        );

        assert_eq!(report.kept, 1);
        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(store.get(1).unwrap().text, "Mine");
    }

    #[test]
    fn test_records_without_text_are_skipped() {
        let mut store = store_with(vec![]);
        let empty = RemoteQuote {
            id: 3,
            title: None,
            text: None,
            category: None,
        };

        let report = merge(&mut store, &[empty], ConflictPolicy::RemoteWins);
        assert_eq!(report.skipped, 1);
        assert!(!report.changed());
        assert!(store.is_empty());
    }

    #[test]
    fn test_blank_title_uses_text() {
        let mut store = store_with(vec![]);
        let record = RemoteQuote {
            id: 77,
            title: Some(String::new()),
            text: Some("real text".to_string()),
            category: None,
        };

        let report = merge(&mut store, &[record], ConflictPolicy::RemoteWins);
        assert_eq!(report.added, 1);
        assert_eq!(store.get(77).unwrap().text, "real text");
    }

    #[test]
    fn test_blank_records_are_skipped() {
        let mut store = store_with(vec![Quote::new(1, "A", "X")]);
        let record = RemoteQuote {
            id: 1,
            title: Some("   ".to_string()),
            text: Some(String::new()),
            category: None,
        };

        let report = merge(&mut store, &[record], ConflictPolicy::RemoteWins);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.get(1).unwrap().text, "A");
    }

    #[test]
    fn test_duplicate_remote_ids_overwrite() {
        let mut store = store_with(vec![]);
        let report = merge(
            &mut store,
            &[remote(5, "First", None), remote(5, "Second", None)],
            ConflictPolicy::RemoteWins,
        );

        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(5).unwrap().text, "Second");
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            "local-wins".parse::<ConflictPolicy>().unwrap(),
            ConflictPolicy::LocalWins
        );
        assert_eq!(ConflictPolicy::RemoteWins.to_string(), "remote-wins");
        assert!("newest-wins".parse::<ConflictPolicy>().is_err());
    }
}
