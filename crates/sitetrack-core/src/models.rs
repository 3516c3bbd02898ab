//! Data models for SiteTrack
//!
//! Defines the Task record, its identifier, and the category, priority,
//! and status vocabularies. Creation input is validated before a Task is
//! constructed; imported records are merged as-is, so the vocabulary types
//! preserve unknown values instead of rejecting them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque unique task identifier.
///
/// Generated when a task is created and never changed by edits. Records
/// arriving through import may carry arbitrary identifier strings; the
/// merge path reassigns missing or colliding ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An identifier absent from an imported record deserializes as empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Board category a task belongs to.
///
/// The board shows the four known categories. Imported records may carry
/// any string; unknown values are kept verbatim and simply never match a
/// board section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Site,
    Tender,
    Cost,
    Drawing,
    Other(String),
}

impl Category {
    /// The four board categories, in display order
    pub const ALL: [Category; 4] = [
        Category::Site,
        Category::Tender,
        Category::Cost,
        Category::Drawing,
    ];

    /// The serialized form of this category
    pub fn as_str(&self) -> &str {
        match self {
            Category::Site => "site",
            Category::Tender => "tender",
            Category::Cost => "cost",
            Category::Drawing => "drawing",
            Category::Other(s) => s,
        }
    }

    /// Human-readable section label
    pub fn label(&self) -> &str {
        match self {
            Category::Site => "Site Work",
            Category::Tender => "Tender Work",
            Category::Cost => "Costing",
            Category::Drawing => "Drawings",
            Category::Other(s) => s,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "site" => Category::Site,
            "tender" => Category::Tender,
            "cost" => Category::Cost,
            "drawing" => Category::Drawing,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority.
///
/// Ordering weight drives board sorting; values outside the known set
/// (possible via import) sort together with `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    /// Sort weight, most urgent first
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low | Priority::Other(_) => 2,
        }
    }

    /// The serialized form of this priority
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Other(String::new())
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task workflow status.
///
/// `Completed` is the terminal state that excludes a task from the Today
/// view. Unknown values from import are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Open,
    InProgress,
    Completed,
    Other(String),
}

impl Status {
    /// The three workflow statuses, in board lane order
    pub const ALL: [Status; 3] = [Status::Open, Status::InProgress, Status::Completed];

    /// The serialized form of this status
    pub fn as_str(&self) -> &str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Other(s) => s,
        }
    }

    /// Whether this is the terminal Completed state
    pub fn is_completed(&self) -> bool {
        matches!(self, Status::Completed)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Other(String::new())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Open" => Status::Open,
            "In Progress" => Status::InProgress,
            "Completed" => Status::Completed,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked unit of work on the board
///
/// Dates are kept as plain `YYYY-MM-DD` strings and only interpreted at
/// projection time. Serialized field names are the persisted document
/// vocabulary; the export document uses the same shape and is directly
/// re-importable. Every field defaults, so partial records merge cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Board category
    pub category: Category,
    /// Short description of the work
    pub name: String,
    /// Planned start date (`YYYY-MM-DD`)
    pub start_date: String,
    /// Planned end date (`YYYY-MM-DD`)
    pub end_date: String,
    /// Person responsible
    pub assigned_to: String,
    /// Priority
    pub priority: Priority,
    /// Workflow status
    pub status: Status,
    /// Floor or level, free-form (drives Today view ordering)
    pub floor: String,
    /// Free-text remarks
    pub remarks: String,
    /// Whether the task is flagged for the Today view
    pub is_today: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Task {
    /// Build a task from validated creation input.
    ///
    /// Rejected drafts never construct a Task. New tasks start off the
    /// Today view with a fresh identifier and creation timestamp.
    pub fn create(draft: TaskDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: TaskId::generate(),
            category: draft.category,
            name: draft.name,
            start_date: draft.start_date,
            end_date: draft.end_date,
            assigned_to: draft.assigned_to,
            priority: draft.priority,
            status: draft.status,
            floor: draft.floor,
            remarks: draft.remarks,
            is_today: false,
            created_at: Utc::now().to_rfc3339(),
        })
    }

    /// Shallow-merge a patch into this task.
    ///
    /// Present fields overwrite, absent fields keep their current value.
    /// Moving to `Completed` always clears the Today flag, whatever the
    /// patch says; no other transition touches it.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(floor) = patch.floor {
            self.floor = floor;
        }
        if let Some(remarks) = patch.remarks {
            self.remarks = remarks;
        }
        if let Some(is_today) = patch.is_today {
            self.is_today = is_today;
        }
        if let Some(status) = patch.status {
            self.status = status;
            if self.status.is_completed() {
                self.is_today = false;
            }
        }
    }
}

/// Creation input for a task.
///
/// Everything the submitter supplies; identity, the Today flag, and the
/// creation timestamp are filled in by [`Task::create`].
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub category: Category,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub assigned_to: String,
    pub priority: Priority,
    pub status: Status,
    pub floor: String,
    pub remarks: String,
}

impl TaskDraft {
    // Creation is the only validation point. Later edits are structured
    // patches and may legally clear any field.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.start_date.trim().is_empty() {
            return Err(ValidationError::MissingField("startDate"));
        }
        if self.end_date.trim().is_empty() {
            return Err(ValidationError::MissingField("endDate"));
        }
        if self.assigned_to.trim().is_empty() {
            return Err(ValidationError::MissingField("assignedTo"));
        }
        if self.priority.as_str().is_empty() {
            return Err(ValidationError::MissingField("priority"));
        }
        if self.status.as_str().is_empty() {
            return Err(ValidationError::MissingField("status"));
        }
        Ok(())
    }
}

/// Partial update for a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub category: Option<Category>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub floor: Option<String>,
    pub remarks: Option<String>,
    pub is_today: Option<bool>,
}

/// Creation-time validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or missing
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
