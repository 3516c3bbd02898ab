//! Import and export command handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sitetrack_core::{Store, EXPORT_FILE_NAME};

use crate::output::Output;

/// Write all tasks to a JSON document
pub fn export(store: &Store, out: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    let document = store.export_all();

    fs::write(&path, &document)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    output.success(&format!(
        "Exported {} task(s) to {}",
        store.len(),
        path.display()
    ));

    Ok(())
}

/// Merge tasks from a JSON document into the store
pub fn import(store: &mut Store, path: &Path, output: &Output) -> Result<()> {
    let document = fs::read(path)
        .with_context(|| format!("Failed to read import document {}", path.display()))?;

    let merged = store.import_merge(&document).context("Import failed")?;

    output.success(&format!("Import successful. Merged {} task(s).", merged));

    Ok(())
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

    #[test]
    fn test_export_then_import_merges_copies() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store
            .import_merge(br#"[{"id": "task-1", "name": "Pour slab"}]"#)
            .unwrap();

        let quiet = Output::new(OutputFormat::Quiet);
        let export_path = temp_dir.path().join("out.json");
        export(&store, Some(export_path.clone()), &quiet).unwrap();

        import(&mut store, &export_path, &quiet).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_import_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);

        let quiet = Output::new(OutputFormat::Quiet);
        let missing = temp_dir.path().join("nope.json");
        assert!(import(&mut store, &missing, &quiet).is_err());
    }
}
