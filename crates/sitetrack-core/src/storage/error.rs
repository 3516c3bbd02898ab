//! Storage error types
//!
//! Write-path failures are classified so callers can tell a full disk from
//! a permissions problem and surface a useful hint. The read path recovers
//! locally and never hands these to callers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A failed storage operation
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created
    #[error("could not create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The process lacks permission for the path
    #[error("permission denied for '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The filesystem is out of space or over quota
    #[error("no space left while writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The task document could not be read
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The task document could not be written
    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The on-disk document does not parse as a task collection
    #[error("task document '{path}' is unreadable: {details}")]
    InvalidFormat { path: PathBuf, details: String },

    /// The in-memory collection refused to serialize
    #[error("task collection failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A path that had to exist was gone
    #[error("missing path '{path}'")]
    Missing { path: PathBuf },

    /// The final rename of an atomic write failed
    #[error("could not move '{from}' into place at '{to}': {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify a raw I/O error against the path it happened on.
    ///
    /// No portable `ErrorKind` exists for a full disk, so that case is
    /// sniffed out of the error text.
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => StorageError::Missing { path },
            _ if looks_like_full_disk(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::Write {
                path,
                source: error,
            },
        }
    }

    /// Whether the user can plausibly fix the cause and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. } | StorageError::PermissionDenied { .. }
        )
    }

    /// A hint for the user, when one exists
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free some disk space, then retry."),
            StorageError::PermissionDenied { .. } => {
                Some("Check ownership and permissions on the data directory.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Make sure the parent directory exists and is writable.")
            }
            _ => None,
        }
    }
}

const FULL_DISK_MARKERS: &[&str] = &[
    "no space left",
    "disk full",
    "quota exceeded",
    "not enough space",
];

fn looks_like_full_disk(error: &io::Error) -> bool {
    let text = error.to_string().to_lowercase();
    FULL_DISK_MARKERS.iter().any(|marker| text.contains(marker))
}
