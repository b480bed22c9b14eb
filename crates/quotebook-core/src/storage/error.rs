//! Slot storage errors
//!
//! Every failure carries the file it happened on. Reads and writes are
//! classified separately so the user gets a hint that matches what was
//! being attempted.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing a slot
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created
    #[error("Cannot create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of disk space writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Slot content is not the JSON it should be
    #[error("Slot '{key}' holds unreadable data: {details}")]
    InvalidFormat { key: String, details: String },

    #[error("No such file: '{path}'")]
    NotFound { path: PathBuf },

    /// The temp file was written but could not replace the slot file
    #[error("Could not move '{from}' into place as '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify an I/O error that happened while reading `path`
    pub fn reading(path: impl Into<PathBuf>, error: io::Error) -> Self {
        let path = path.into();
        classify(path, error)
            .unwrap_or_else(|(path, source)| StorageError::ReadError { path, source })
    }

    /// Classify an I/O error that happened while writing `path`
    pub fn writing(path: impl Into<PathBuf>, error: io::Error) -> Self {
        let path = path.into();
        classify(path, error)
            .unwrap_or_else(|(path, source)| StorageError::WriteError { path, source })
    }

    /// Whether the saved slot file was left as it was
    ///
    /// Slot writes go through a temp file, so anything that fails before
    /// the final rename cannot have damaged the existing data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::CreateDirectory { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::DiskFull { .. }
                | StorageError::WriteError { .. }
                | StorageError::AtomicWriteFailed { .. }
        )
    }

    /// What the user can do about it, when there is something to do
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::CreateDirectory { .. } | StorageError::PermissionDenied { .. } => Some(
                "Make the data directory writable, or move it with: quotebook config set data_dir <path>",
            ),
            StorageError::DiskFull { .. } => Some("Free up disk space, then try again."),
            StorageError::InvalidFormat { .. } => Some(
                "Fix or delete the slot file. Quotebook starts from its built-in quotes without it.",
            ),
            StorageError::AtomicWriteFailed { .. } => {
                Some("Remove the leftover .tmp file in the data directory, then try again.")
            }
            _ => None,
        }
    }
}

/// Map the I/O error kinds that read and write have in common
///
/// Hands the path and error back when the kind is not one of them.
fn classify(path: PathBuf, error: io::Error) -> Result<StorageError, (PathBuf, io::Error)> {
    match error.kind() {
        io::ErrorKind::PermissionDenied => Ok(StorageError::PermissionDenied {
            path,
            source: error,
        }),
        io::ErrorKind::NotFound => Ok(StorageError::NotFound { path }),
        _ if is_disk_full(&error) => Ok(StorageError::DiskFull {
            path,
            source: error,
        }),
        _ => Err((path, error)),
    }
}

fn is_disk_full(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    ["no space left", "disk full", "quota exceeded", "not enough space"]
        .iter()
        .any(|needle| msg.contains(needle))
}

/// Result type for slot operations
pub type StorageResult<T> = Result<T, StorageError>;
