//! CLI command handlers

pub mod board;
pub mod config;
pub mod status;
pub mod task;
pub mod transfer;

use chrono::{Local, NaiveDate};

/// The date used for deadline flags and view ordering
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
