//! Task document persistence
//!
//! The whole task collection lives in one pretty-printed JSON document,
//! `tasks.v1.json`, under the configured data directory (by default
//! `~/.local/share/sitetrack/`). Every save rewrites the document through
//! a temp-file-and-rename so a crash cannot leave it half written.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::models::Task;

use super::error::{StorageError, StorageResult};

/// Reads and writes the on-disk task document
pub struct TaskPersistence {
    config: Config,
}

impl TaskPersistence {
    /// Build a persistence handle over the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this handle writes under
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a task document exists on disk
    pub fn exists(&self) -> bool {
        self.config.tasks_path().exists()
    }

    /// Load the persisted task collection
    ///
    /// Startup never fails on bad state: an absent document yields an empty
    /// collection, and an unreadable or malformed one is logged and skipped.
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => tasks,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Ignoring unreadable task document: {err}");
                Vec::new()
            }
        }
    }

    /// Load the task document, distinguishing absent from unreadable
    fn try_load(&self) -> StorageResult<Option<Vec<Task>>> {
        let path = self.config.tasks_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        let tasks = serde_json::from_slice(&bytes).map_err(|err| StorageError::InvalidFormat {
            path: path.clone(),
            details: err.to_string(),
        })?;

        Ok(Some(tasks))
    }

    /// Persist the full task collection, atomically
    pub fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(tasks).map_err(StorageError::Serialize)?;
        atomic_write(&self.config.tasks_path(), &bytes)
    }

    /// Report existence and size of the persisted document
    pub fn stats(&self) -> StorageStats {
        match fs::metadata(self.config.tasks_path()) {
            Ok(meta) => StorageStats {
                exists: true,
                size_bytes: meta.len(),
            },
            Err(_) => StorageStats {
                exists: false,
                size_bytes: 0,
            },
        }
    }
}

/// Existence and size of the persisted task document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Whether the document exists on disk
    pub exists: bool,
    /// Document size in bytes
    pub size_bytes: u64,
}

impl StorageStats {
    /// Human-readable document size
    pub fn size_human(&self) -> String {
        let bytes = self.size_bytes;
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

/// Replace the file at `path` with `data` in one step.
///
/// The bytes go to a sibling temp file, get synced, and land via rename.
/// Readers see either the old document or the new one, never a torn write.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    file.sync_all()
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::RenameFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
