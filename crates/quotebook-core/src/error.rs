//! Quote operation errors

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by quote store and codec operations
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Quote text was empty after trimming
    #[error("Please enter both a quote and a category (quote text is empty)")]
    EmptyText,

    /// Category was empty after trimming
    #[error("Please enter both a quote and a category (category is empty)")]
    EmptyCategory,

    /// Import input was not a JSON array of quotes
    #[error("Invalid JSON file: {0}")]
    InvalidJson(String),

    /// No unused ID is left above the highest one in the store
    #[error("No quote IDs left: the collection already holds ID {max}")]
    IdsExhausted { max: u64 },

    /// Reading or writing a slot failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuoteError {
    /// Whether the error came from user input rather than the system
    ///
    /// User errors leave all state untouched.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuoteError::EmptyText | QuoteError::EmptyCategory | QuoteError::InvalidJson(_)
        )
    }
}

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;
