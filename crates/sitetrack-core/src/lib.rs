//! SiteTrack Core Library
//!
//! This crate provides the core functionality for SiteTrack, a local-first
//! task board for construction sites: site work, tender work, costing, and
//! drawings, with a per-category "Today" focus list.
//!
//! # Architecture
//!
//! - **Store**: owns the in-memory task collection; every effective
//!   mutation persists the whole collection and then notifies listeners
//! - **Projection**: pure read-side functions that derive board lanes and
//!   the Today view from a snapshot plus a caller-supplied date
//! - **Transfer**: JSON import/export documents, the same shape the store
//!   persists
//!
//! All queries are served from the in-memory collection.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a task
//! let task = Task::create(draft)?;
//! store.add(&task)?;
//!
//! // Query a board lane
//! let lane = store.tasks_for(&Category::Site, &Status::Open, today);
//! ```
//!
//! # Modules
//!
//! - `store`: unified task store (main entry point)
//! - `models`: task record, identifier, and vocabulary types
//! - `projection`: board and Today view derivation
//! - `transfer`: import/export document handling
//! - `storage`: task document persistence
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod projection;
pub mod storage;
pub mod store;
pub mod transfer;

pub use config::Config;
pub use models::{
    Category, Priority, Status, Task, TaskDraft, TaskId, TaskPatch, ValidationError,
};
pub use projection::Projected;
pub use storage::{StorageError, StorageStats, TaskPersistence};
pub use store::{ChangeListener, Store};
pub use transfer::{MalformedDocument, EXPORT_FILE_NAME};
