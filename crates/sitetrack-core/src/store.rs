//! Unified task store
//!
//! The `Store` owns the authoritative in-memory task collection and
//! coordinates:
//! - Persistence (one JSON document on disk, written atomically)
//! - Change notification (listeners see each new snapshot)
//!
//! Every effective mutation persists exactly once and then signals
//! listeners exactly once, in that order, so observers never see state
//! that is not already on disk. Mutations addressing an unknown id do
//! neither.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Loads persisted tasks, or starts empty
//!
//! // Add a task
//! let task = Task::create(draft)?;
//! store.add(&task)?;
//!
//! // Query a board lane
//! let lane = store.tasks_for(&Category::Site, &Status::Open, today);
//! ```

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::config::Config;
use crate::models::{Category, Status, Task, TaskId, TaskPatch};
use crate::projection::{self, Projected};
use crate::storage::{StorageStats, TaskPersistence};
use crate::transfer;

/// Listener invoked with the post-mutation snapshot, after it is persisted
pub type ChangeListener = Box<dyn FnMut(&[Task])>;

/// Unified task store for SiteTrack
///
/// Owns the task collection and keeps the persisted document in sync.
pub struct Store {
    /// The in-memory task collection, in insertion order
    tasks: Vec<Task>,
    /// Persistence handler for the task document
    persistence: TaskPersistence,
    /// Observers notified after each persisted mutation
    listeners: Vec<ChangeListener>,
}

impl Store {
    /// Open the store, loading any persisted task collection
    ///
    /// Startup is fail-soft: a missing or unreadable document starts an
    /// empty collection rather than an error.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Could not load configuration")?;
        Ok(Self::open_with_config(config))
    }

    /// Open the store over an explicit configuration
    pub fn open_with_config(config: Config) -> Self {
        let persistence = TaskPersistence::new(config);
        let tasks = persistence.load();
        Self {
            tasks,
            persistence,
            listeners: Vec::new(),
        }
    }

    /// The configuration the store persists under
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    /// Report existence and size of the persisted document
    pub fn storage_stats(&self) -> StorageStats {
        self.persistence.stats()
    }

    // ==================== Task Operations ====================

    /// Append a new task to the collection
    ///
    /// No duplicate-id check happens here: identifiers are generated unique
    /// at creation, and the import path reconciles colliding ones itself.
    pub fn add(&mut self, task: &Task) -> Result<()> {
        debug!(id = %task.id, "adding task");
        self.tasks.push(task.clone());
        self.save_and_notify()
    }

    /// Shallow-merge a patch into the task with the given id
    ///
    /// Returns `false` when no task has this id; in that case nothing is
    /// persisted and no listener fires. A missing update target is not an
    /// error.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<bool> {
        match self.tasks.iter_mut().find(|task| &task.id == id) {
            Some(task) => task.apply(patch),
            None => {
                debug!(id = %id, "update target not found, nothing to do");
                return Ok(false);
            }
        }
        self.save_and_notify()?;
        Ok(true)
    }

    /// Remove the task with the given id
    ///
    /// Returns `false` when no task has this id; in that case nothing is
    /// persisted and no listener fires. A missing delete target is not an
    /// error.
    pub fn remove(&mut self, id: &TaskId) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!(id = %id, "delete target not found, nothing to do");
            return Ok(false);
        }
        self.save_and_notify()?;
        Ok(true)
    }

    /// Get a task by id
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Snapshot of the full collection, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the collection
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ==================== Views ====================

    /// Board lane: tasks in `category` with `status`, in board order
    pub fn tasks_for(
        &self,
        category: &Category,
        status: &Status,
        today: NaiveDate,
    ) -> Vec<Projected<'_>> {
        projection::tasks_for(&self.tasks, category, status, today)
    }

    /// Today view for `category`: flagged, not completed, in floor order
    pub fn today_tasks_for(&self, category: &Category, today: NaiveDate) -> Vec<Projected<'_>> {
        projection::today_tasks_for(&self.tasks, category, today)
    }

    // ==================== Import / Export ====================

    /// Encode the full collection as a transfer document
    ///
    /// The output is the persisted shape and is directly re-importable.
    pub fn export_all(&self) -> Vec<u8> {
        transfer::export_document(&self.tasks)
    }

    /// Merge an externally produced transfer document into the collection
    ///
    /// All-or-nothing: a document that fails to parse changes nothing.
    /// Every record in a parsed document is appended; a record whose id is
    /// missing or already taken gets a freshly generated one, so existing
    /// tasks are never overwritten. Returns the number of records merged.
    pub fn import_merge(&mut self, document: &[u8]) -> Result<usize> {
        let incoming =
            transfer::parse_document(document).context("Failed to parse import document")?;

        let mut ids: HashSet<TaskId> = self.tasks.iter().map(|task| task.id.clone()).collect();
        let merged = incoming.len();

        for mut task in incoming {
            if task.id.is_empty() || ids.contains(&task.id) {
                task.id = fresh_id(&ids);
            }
            ids.insert(task.id.clone());
            self.tasks.push(task);
        }

        self.save_and_notify()?;
        debug!(merged, "merged imported tasks");
        Ok(merged)
    }

    // ==================== Change Notification ====================

    /// Register a listener invoked with the new snapshot after every
    /// persisted mutation
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Persist the collection, then signal listeners
    ///
    /// The write happens before any observer sees the new state, so memory
    /// and disk never diverge observably. Each effective mutation goes
    /// through here exactly once.
    fn save_and_notify(&mut self) -> Result<()> {
        self.persistence
            .save(&self.tasks)
            .context("Failed to save task document")?;
        for listener in &mut self.listeners {
            listener(&self.tasks);
        }
        Ok(())
    }
}

// A reassigned id must not collide with anything already in the collection,
// including records merged earlier in the same document
fn fresh_id(existing: &HashSet<TaskId>) -> TaskId {
    loop {
        let id = TaskId::generate();
        if !existing.contains(&id) {
            return id;
        }
    }
}
