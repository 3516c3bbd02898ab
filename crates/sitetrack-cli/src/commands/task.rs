//! Task command handlers

use anyhow::{bail, Context, Result};

use sitetrack_core::{projection, Status, Store, Task, TaskDraft, TaskId, TaskPatch};

use crate::output::{short_id, Output};
use crate::prompt::confirm;

use super::local_today;

/// Create a new task
pub fn add(store: &mut Store, draft: TaskDraft, output: &Output) -> Result<()> {
    let task = Task::create(draft)
        .map_err(|err| anyhow::anyhow!("Please fill all required fields ({err})"))?;

    store.add(&task).context("Failed to create task")?;

    output.success(&format!("Created task: {}", task.id));
    output.print_task(&projection::project(&task, local_today()));

    Ok(())
}

/// Show details for a single task
pub fn show(store: &Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;
    let task = store
        .get(&task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    output.print_task(&projection::project(task, local_today()));

    Ok(())
}

/// Apply field changes to a task
pub fn edit(store: &mut Store, id: &str, patch: TaskPatch, output: &Output) -> Result<()> {
    if patch == TaskPatch::default() {
        bail!("Nothing to change. Pass at least one field flag.");
    }

    let task_id = resolve_task_id(id, store)?;
    store.update(&task_id, patch).context("Failed to update task")?;

    output.success("Task updated");
    if let Some(task) = store.get(&task_id) {
        output.print_task(&projection::project(task, local_today()));
    }

    Ok(())
}

/// Mark a task completed
pub fn done(store: &mut Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;

    let patch = TaskPatch {
        status: Some(Status::Completed),
        ..Default::default()
    };
    store.update(&task_id, patch).context("Failed to update task")?;

    output.success(&format!("Completed task: {}", task_id));

    Ok(())
}

/// Reopen a completed task
pub fn reopen(store: &mut Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;
    let task = store
        .get(&task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if !task.status.is_completed() {
        bail!("Task is not completed: {}", task_id);
    }

    let patch = TaskPatch {
        status: Some(Status::Open),
        ..Default::default()
    };
    store.update(&task_id, patch).context("Failed to update task")?;

    output.success(&format!("Reopened task: {}", task_id));

    Ok(())
}

/// Flag a task for the Today view
pub fn today_add(store: &mut Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;
    let task = store
        .get(&task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if task.status.is_completed() {
        bail!("Task is completed and cannot be added to Today's list.");
    }

    let patch = TaskPatch {
        is_today: Some(true),
        ..Default::default()
    };
    store.update(&task_id, patch).context("Failed to update task")?;

    output.success(&format!("Added to Today: {}", task_id));

    Ok(())
}

/// Remove a task from the Today view
pub fn today_remove(store: &mut Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;

    let patch = TaskPatch {
        is_today: Some(false),
        ..Default::default()
    };
    store.update(&task_id, patch).context("Failed to update task")?;

    output.success(&format!("Removed from Today: {}", task_id));

    Ok(())
}

/// Delete a task
pub fn delete(store: &mut Store, id: &str, output: &Output) -> Result<()> {
    let task_id = resolve_task_id(id, store)?;
    let task = store
        .get(&task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.should_prompt() {
        println!("Delete task: {} - {}", short_id(task.id.as_str()), task.name);
        if !confirm("Proceed?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&task_id).context("Failed to delete task")?;

    output.success(&format!("Deleted task: {}", task_id));

    Ok(())
}

/// Resolve a task ID from user input (full ID or unique prefix)
fn resolve_task_id(id: &str, store: &Store) -> Result<TaskId> {
    let exact = TaskId::from(id);
    if store.get(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|task| task.id.as_str().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No task found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple tasks match '{}':", id);
            for task in &matches {
                eprintln!("  {} - {}", task.id, task.name);
            }
            bail!("ID prefix '{}' is ambiguous, add more characters", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use sitetrack_core::Config;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> Store {
        Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
        })
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn seed(store: &mut Store, document: &str) {
        store.import_merge(document.as_bytes()).unwrap();
    }

    #[test]
    fn test_resolve_task_id_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(
            &mut store,
            r#"[
                {"id": "alpha-1", "name": "One"},
                {"id": "alpha-2", "name": "Two"},
                {"id": "beta-1", "name": "Three"}
            ]"#,
        );

        assert_eq!(
            resolve_task_id("alpha-1", &store).unwrap().as_str(),
            "alpha-1"
        );
        assert_eq!(resolve_task_id("beta", &store).unwrap().as_str(), "beta-1");
        assert!(resolve_task_id("alpha", &store).is_err());
        assert!(resolve_task_id("gamma", &store).is_err());
    }

    #[test]
    fn test_today_add_refuses_completed_task() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(
            &mut store,
            r#"[{"id": "done-1", "name": "Finished", "status": "Completed"}]"#,
        );

        let err = today_add(&mut store, "done-1", &quiet()).unwrap_err();
        assert!(err.to_string().contains("completed"));
        assert!(!store.get(&TaskId::from("done-1")).unwrap().is_today);
    }

    #[test]
    fn test_done_then_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(
            &mut store,
            r#"[{"id": "task-1", "name": "Pour slab", "status": "Open", "isToday": true}]"#,
        );

        done(&mut store, "task-1", &quiet()).unwrap();
        let task = store.get(&TaskId::from("task-1")).unwrap();
        assert!(task.status.is_completed());
        assert!(!task.is_today);

        reopen(&mut store, "task-1", &quiet()).unwrap();
        let task = store.get(&TaskId::from("task-1")).unwrap();
        assert_eq!(task.status, Status::Open);
    }

    #[test]
    fn test_reopen_rejects_open_task() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(&mut store, r#"[{"id": "task-1", "name": "Open task"}]"#);

        assert!(reopen(&mut store, "task-1", &quiet()).is_err());
    }

    #[test]
    fn test_delete_skips_prompt_in_quiet_mode() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(&mut store, r#"[{"id": "task-1", "name": "Scaffolding"}]"#);

        delete(&mut store, "task-1", &quiet()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_requires_a_field() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        seed(&mut store, r#"[{"id": "task-1", "name": "Pour slab"}]"#);

        let err = edit(&mut store, "task-1", TaskPatch::default(), &quiet()).unwrap_err();
        assert!(err.to_string().contains("Nothing to change"));
    }

    #[test]
    fn test_add_rejects_incomplete_draft() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);

        let draft = TaskDraft {
            name: "  ".to_string(),
            ..Default::default()
        };
        let err = add(&mut store, draft, &quiet()).unwrap_err();
        assert!(err.to_string().contains("required fields"));
        assert!(store.is_empty());
    }
}
