//! JSON import and export
//!
//! Export writes the full quote list as a pretty-printed JSON array.
//! Import accepts a JSON array of `{id?, text, category}` objects; anything
//! else is rejected before the store is touched.

use std::fs;
use std::path::Path;

use crate::error::{QuoteError, QuoteResult};
use crate::models::{ImportedQuote, Quote};
use crate::storage::StorageError;

/// File name used when no export path is given
pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// Serialize quotes as a pretty-printed JSON array
pub fn export(quotes: &[Quote]) -> QuoteResult<String> {
    serde_json::to_string_pretty(quotes).map_err(|e| {
        StorageError::InvalidFormat {
            key: DEFAULT_EXPORT_FILE.to_string(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Export quotes to a file
pub fn export_to_file(quotes: &[Quote], path: &Path) -> QuoteResult<()> {
    let content = export(quotes)?;
    fs::write(path, content).map_err(|e| StorageError::writing(path, e))?;
    Ok(())
}

/// Parse an import document
///
/// Fails with `InvalidJson` when the input is not JSON, is not an array,
/// or holds an element without `text` and `category`.
pub fn import(raw: &str) -> QuoteResult<Vec<ImportedQuote>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| QuoteError::InvalidJson(e.to_string()))?;

    if !value.is_array() {
        return Err(QuoteError::InvalidJson(
            "expected a JSON array of quotes".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| QuoteError::InvalidJson(e.to_string()))
}

/// Read and parse an import file
pub fn import_file(path: &Path) -> QuoteResult<Vec<ImportedQuote>> {
    let raw = fs::read_to_string(path).map_err(|e| StorageError::reading(path, e))?;
    import(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_quotes;
    use crate::storage::MemorySlots;
    use crate::store::QuoteStore;
    use tempfile::TempDir;

    #[test]
    fn test_export_is_pretty_array() {
        let json = export(&default_quotes()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"category\": \"Life\""));
    }

    #[test]
    fn test_export_then_import_keeps_pairs() {
        let mut store = QuoteStore::load(Box::new(MemorySlots::new())).unwrap();
        store.add("Exported", "Codec").unwrap();

        let json = export(store.all()).unwrap();
        let imported = import(&json).unwrap();

        let original: Vec<_> = store
            .all()
            .iter()
            .map(|q| (q.text.clone(), q.category.clone()))
            .collect();
        let restored: Vec<_> = imported
            .iter()
            .map(|q| (q.text.clone(), q.category.clone()))
            .collect();
        assert_eq!(original, restored);
        assert!(imported.iter().all(|q| q.id.is_some()));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            import("{ nope"),
            Err(QuoteError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = import(r#"{"text": "A", "category": "B"}"#).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidJson(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_import_rejects_bad_elements() {
        assert!(matches!(
            import(r#"[{"text": "No category"}]"#),
            Err(QuoteError::InvalidJson(_))
        ));
        assert!(matches!(
            import(r#"["just a string"]"#),
            Err(QuoteError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_import_empty_array() {
        assert!(import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_EXPORT_FILE);

        export_to_file(&default_quotes(), &path).unwrap();
        let imported = import_file(&path).unwrap();
        assert_eq!(imported.len(), 3);
        assert_eq!(imported[0].id, Some(1));
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_file(&temp_dir.path().join("missing.json"));
        assert!(matches!(
            result,
            Err(QuoteError::Storage(StorageError::NotFound { .. }))
        ));
    }
}
