//! Storage layer
//!
//! Persists the task collection as a single JSON document on disk.
//!
//! ## Architecture
//!
//! - Writes are atomic: temp file, sync, rename
//! - Reads are fail-soft: a missing or damaged document starts an empty
//!   board instead of failing startup
//!
//! The persisted document is the same shape the export/import paths use.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{StorageStats, TaskPersistence};
