//! Notebook registry persistence
//!
//! A flat tab-delimited file at the repository root holding the notebooks
//! marked for automatic re-execution. Single `filename` column, deduplicated
//! (first occurrence wins) on every load and store. No locking; concurrent
//! CLI invocations are not guaranteed consistent.

use crate::git::registry_path;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One registry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Row {
    filename: String,
}

/// A registry entry paired with its on-disk existence at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub filename: String,
    pub exists: bool,
}

/// Load registered notebook names, deduplicated in first-seen order.
///
/// A missing registry file is an empty registry, not an error.
pub fn load(root: &Path) -> Result<Vec<String>> {
    let path = registry_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
        .with_context(|| format!("failed to read registry: {}", path.display()))?;

    let mut names = Vec::new();
    for row in reader.deserialize() {
        let row: Row =
            row.with_context(|| format!("malformed registry row: {}", path.display()))?;
        if !names.contains(&row.filename) {
            names.push(row.filename);
        }
    }
    Ok(names)
}

/// Write notebook names to the registry, deduplicated in first-seen order.
pub fn store(root: &Path, names: &[String]) -> Result<()> {
    let path = registry_path(root);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
        .with_context(|| format!("failed to write registry: {}", path.display()))?;

    let mut seen = Vec::new();
    for name in names {
        if seen.contains(name) {
            continue;
        }
        writer
            .serialize(Row {
                filename: name.clone(),
            })
            .with_context(|| format!("failed to write registry row: {}", name))?;
        seen.push(name.clone());
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush registry: {}", path.display()))
}

/// Register a notebook for autorun. Re-marking is an error.
pub fn mark(root: &Path, filename: &str) -> Result<()> {
    let mut names = load(root)?;
    if names.iter().any(|n| n == filename) {
        bail!("already registered: {}", filename);
    }
    names.push(filename.to_string());
    store(root, &names)
}

/// Remove a notebook from the registry. Unknown notebooks are an error.
pub fn unmark(root: &Path, filename: &str) -> Result<()> {
    let mut names = load(root)?;
    let before = names.len();
    names.retain(|n| n != filename);
    if names.len() == before {
        bail!("not registered: {}", filename);
    }
    store(root, &names)
}

/// List registered notebooks with an on-disk existence flag for each.
pub fn list(root: &Path) -> Result<Vec<RegistryEntry>> {
    Ok(load(root)?
        .into_iter()
        .map(|filename| {
            let exists = root.join(&filename).exists();
            RegistryEntry { filename, exists }
        })
        .collect())
}

/// Drop entries whose notebook is missing on disk; returns the dropped names.
pub fn prune(root: &Path) -> Result<Vec<String>> {
    let names = load(root)?;
    let (kept, dropped): (Vec<String>, Vec<String>) = names
        .into_iter()
        .partition(|name| root.join(name).exists());
    if !dropped.is_empty() {
        store(root, &kept)?;
    }
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_registry_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(load(dir.path()).expect("load").is_empty());
    }

    #[test]
    fn test_mark_list_unmark_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("a.ipynb"), "{}").expect("write notebook");

        mark(dir.path(), "a.ipynb").expect("mark existing");
        mark(dir.path(), "missing.ipynb").expect("mark missing");

        let entries = list(dir.path()).expect("list");
        assert_eq!(
            entries,
            vec![
                RegistryEntry {
                    filename: "a.ipynb".to_string(),
                    exists: true
                },
                RegistryEntry {
                    filename: "missing.ipynb".to_string(),
                    exists: false
                },
            ]
        );

        unmark(dir.path(), "missing.ipynb").expect("unmark");
        let names = load(dir.path()).expect("load");
        assert_eq!(names, vec!["a.ipynb"]);
    }

    #[test]
    fn test_duplicate_mark_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        mark(dir.path(), "a.ipynb").expect("mark");
        assert!(mark(dir.path(), "a.ipynb").is_err());
    }

    #[test]
    fn test_unmark_unknown_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(unmark(dir.path(), "a.ipynb").is_err());
    }

    #[test]
    fn test_load_dedups_hand_edited_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            registry_path(dir.path()),
            "filename\na.ipynb\nb.ipynb\na.ipynb\n",
        )
        .expect("write registry");
        let names = load(dir.path()).expect("load");
        assert_eq!(names, vec!["a.ipynb", "b.ipynb"]);
    }

    #[test]
    fn test_load_store_consistency() {
        let dir = tempfile::tempdir().expect("create temp dir");
        mark(dir.path(), "a.ipynb").expect("mark");
        mark(dir.path(), "b.ipynb").expect("mark");

        let first = load(dir.path()).expect("load");
        store(dir.path(), &first).expect("store");
        let second = load(dir.path()).expect("load");
        store(dir.path(), &second).expect("store");
        let third = load(dir.path()).expect("load");
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_prune_drops_missing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("kept.ipynb"), "{}").expect("write notebook");
        mark(dir.path(), "kept.ipynb").expect("mark");
        mark(dir.path(), "gone.ipynb").expect("mark");

        let dropped = prune(dir.path()).expect("prune");
        assert_eq!(dropped, vec!["gone.ipynb"]);
        assert_eq!(load(dir.path()).expect("load"), vec!["kept.ipynb"]);
    }
}
