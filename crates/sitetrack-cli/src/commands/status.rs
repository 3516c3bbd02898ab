//! `status` subcommand: storage report and task counts

use anyhow::Result;

use sitetrack_core::{Category, Status, Store};

use crate::output::{Output, OutputFormat};

/// Show storage information and task counts
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let config = store.config();
    let stats = store.storage_stats();
    let tasks = store.tasks();

    let count_status = |status: &Status| tasks.iter().filter(|t| &t.status == status).count();
    let count_category =
        |category: &Category| tasks.iter().filter(|t| &t.category == category).count();
    let other_status = tasks
        .iter()
        .filter(|t| !Status::ALL.contains(&t.status))
        .count();
    let today_count = tasks.iter().filter(|t| t.is_today).count();

    match output.format {
        OutputFormat::Json => {
            let mut by_status = serde_json::Map::new();
            for status in &Status::ALL {
                by_status.insert(status.to_string(), count_status(status).into());
            }
            if other_status > 0 {
                by_status.insert("Other".to_string(), other_status.into());
            }

            let mut by_category = serde_json::Map::new();
            for category in &Category::ALL {
                by_category.insert(category.to_string(), count_category(category).into());
            }

            let json = serde_json::json!({
                "data_dir": config.data_dir,
                "document": {
                    "path": config.tasks_path(),
                    "exists": stats.exists,
                    "size_bytes": stats.size_bytes,
                },
                "counts": {
                    "total": store.len(),
                    "today": today_count,
                    "by_status": by_status,
                    "by_category": by_category,
                },
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("SiteTrack Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Document: {}", config.tasks_path().display());
            println!("  Exists:   {}", if stats.exists { "yes" } else { "no" });
            println!("  Size:     {}", stats.size_human());
            println!();
            println!("Tasks:");
            println!("  Total: {}", store.len());
            for status in &Status::ALL {
                println!("  {}: {}", status, count_status(status));
            }
            if other_status > 0 {
                println!("  Other: {}", other_status);
            }
            println!("  On Today list: {}", today_count);
            println!();
            println!("Categories:");
            for category in &Category::ALL {
                println!("  {}: {}", category.label(), count_category(category));
            }
        }
    }

    Ok(())
}
