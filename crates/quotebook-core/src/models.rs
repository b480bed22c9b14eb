//! Data models for Quotebook
//!
//! Defines the quote record plus the looser shapes accepted from import
//! files and from the remote endpoint.

use serde::{Deserialize, Serialize};

/// Category filter value meaning "no filtering"
pub const ALL_CATEGORY: &str = "all";

/// Category given to remote quotes that arrive without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Check whether a category value is the "all" sentinel
///
/// Matches case-insensitively, so `All` works too.
pub fn is_all_category(category: &str) -> bool {
    category.eq_ignore_ascii_case(ALL_CATEGORY)
}

/// A single quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    /// Unique identifier
    pub id: u64,
    /// The quote itself
    pub text: String,
    /// Category used for filtering
    pub category: String,
}

impl Quote {
    /// Create a quote with a known ID
    pub fn new(id: u64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
        }
    }

    /// Whether this quote belongs to the given category filter
    pub fn matches_category(&self, category: &str) -> bool {
        is_all_category(category) || self.category == category
    }
}

/// A quote read from an import file
///
/// The ID is optional; records without one get a fresh ID on import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportedQuote {
    #[serde(default)]
    pub id: Option<u64>,
    pub text: String,
    pub category: String,
}

impl From<Quote> for ImportedQuote {
    fn from(quote: Quote) -> Self {
        Self {
            id: Some(quote.id),
            text: quote.text,
            category: quote.category,
        }
    }
}

/// A quote as returned by the remote endpoint
///
/// Remote records carry either `title` or `text`; anything else the
/// endpoint sends (`body`, `userId`, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteQuote {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RemoteQuote {
    /// The quote text, preferring `title` over `text`
    ///
    /// Blank values count as missing, so an empty `title` falls through
    /// to `text`.
    pub fn content(&self) -> Option<&str> {
        fn present(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
        }
        present(&self.title).or_else(|| present(&self.text))
    }

    /// Convert to a local quote, defaulting the category
    ///
    /// Returns `None` when the record has no text at all.
    pub fn to_quote(&self) -> Option<Quote> {
        let text = self.content()?;
        let category = self.category.as_deref().unwrap_or(UNCATEGORIZED);
        Some(Quote::new(self.id, text, category))
    }
}

/// The quotes a fresh store starts with
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            1,
            "The best way to predict the future is to invent it.",
            "Inspiration",
        ),
        Quote::new(
            2,
            "Life is what happens when you’re busy making other plans.",
            "Life",
        ),
        Quote::new(3, "Do or do not. There is no try.", "Motivation"),
    ]
}
