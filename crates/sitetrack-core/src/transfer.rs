//! Import/export document handling
//!
//! The transfer document is a JSON array of task records, the exact shape
//! the store persists. Export produces it; import parses it back. Parsing
//! is all-or-nothing: one bad element rejects the whole document, and no
//! per-record field validation happens here (partial records merge with
//! defaults).

use thiserror::Error;

use crate::models::Task;

/// Suggested file name for exported task documents
pub const EXPORT_FILE_NAME: &str = "site-tracker-tasks.json";

/// Import document that could not be parsed
///
/// Covers bytes that are not valid JSON, a document that is not an array,
/// and array elements that are not objects.
#[derive(Error, Debug)]
#[error("Malformed import document: {0}")]
pub struct MalformedDocument(#[from] serde_json::Error);

/// Encode the task collection as a pretty-printed JSON document
///
/// The output is directly re-importable and matches the persisted form.
pub fn export_document(tasks: &[Task]) -> Vec<u8> {
    serde_json::to_vec_pretty(tasks).expect("JSON encoding failed")
}

/// Parse a transfer document into task records
///
/// Every element must be an object; unknown field values are kept verbatim
/// and missing fields default. Identifier reconciliation happens later, at
/// merge time.
pub fn parse_document(bytes: &[u8]) -> Result<Vec<Task>, MalformedDocument> {
    let tasks = serde_json::from_slice(bytes)?;
    Ok(tasks)
}
