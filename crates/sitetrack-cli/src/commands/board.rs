//! Board and Today view command handlers

use anyhow::Result;

use sitetrack_core::{Category, Status, Store};

use crate::output::{task_row, Output, OutputFormat};

use super::local_today;

/// Shown in place of an empty Today lane
const NO_TODAY_TASKS: &str = "No tasks added for today.";

/// Show board lanes, optionally narrowed to one category or status
pub fn list(
    store: &Store,
    category: Option<Category>,
    status: Option<Status>,
    output: &Output,
) -> Result<()> {
    let today = local_today();
    let single_lane = category.is_some() && status.is_some();
    let categories = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };
    let statuses = match status {
        Some(s) => vec![s],
        None => Status::ALL.to_vec(),
    };

    match output.format {
        OutputFormat::Json => {
            let mut lanes = Vec::new();
            for category in &categories {
                for status in &statuses {
                    let lane = store.tasks_for(category, status, today);
                    lanes.push(serde_json::json!({
                        "category": category,
                        "status": status,
                        "tasks": lane,
                    }));
                }
            }
            println!("{}", serde_json::to_string_pretty(&lanes)?);
        }
        OutputFormat::Quiet => {
            for category in &categories {
                for status in &statuses {
                    for projected in store.tasks_for(category, status, today) {
                        println!("{}", projected.task.id);
                    }
                }
            }
        }
        OutputFormat::Human => {
            let mut shown = 0;
            for category in &categories {
                for status in &statuses {
                    let lane = store.tasks_for(category, status, today);
                    // Skip empty lanes unless the user asked for exactly this one
                    if lane.is_empty() && !single_lane {
                        continue;
                    }
                    println!("{} / {}", category.label(), status);
                    if lane.is_empty() {
                        println!("  No tasks found.");
                    }
                    for projected in &lane {
                        println!("  {}", task_row(projected));
                    }
                    println!();
                    shown += lane.len();
                }
            }
            println!("{} task(s)", shown);
        }
    }

    Ok(())
}

/// Show the Today view, optionally narrowed to one category
pub fn today(store: &Store, category: Option<Category>, output: &Output) -> Result<()> {
    let today = local_today();
    let categories = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };

    match output.format {
        OutputFormat::Json => {
            let mut lanes = Vec::new();
            for category in &categories {
                let lane = store.today_tasks_for(category, today);
                lanes.push(serde_json::json!({
                    "category": category,
                    "tasks": lane,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&lanes)?);
        }
        OutputFormat::Quiet => {
            for category in &categories {
                for projected in store.today_tasks_for(category, today) {
                    println!("{}", projected.task.id);
                }
            }
        }
        OutputFormat::Human => {
            for category in &categories {
                let lane = store.today_tasks_for(category, today);
                println!("Today / {}", category.label());
                if lane.is_empty() {
                    println!("  {}", NO_TODAY_TASKS);
                }
                for projected in &lane {
                    println!("  {}", task_row(projected));
                }
                println!();
            }
        }
    }

    Ok(())
}
