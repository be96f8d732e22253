//! Notebook execution and export
//!
//! Delegates execution and HTML export to `jupyter nbconvert` (an external
//! collaborator, like git) and strips execution metadata from the notebook
//! JSON afterwards so re-runs do not produce noisy diffs.

use crate::registry;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::process::Command;

/// Invoke `jupyter` with the given arguments from the given directory.
fn jupyter_at(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("jupyter")
        .current_dir(dir)
        .args(args)
        .output()
        .context("failed to invoke jupyter")?;

    if !output.status.success() {
        anyhow::bail!(
            "jupyter {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Re-execute a notebook in place.
pub fn execute(root: &Path, filename: &str) -> Result<()> {
    jupyter_at(
        root,
        &[
            "nbconvert",
            "--to",
            "notebook",
            "--execute",
            "--inplace",
            filename,
        ],
    )
    .with_context(|| format!("failed to execute notebook: {}", filename))
}

/// Strip execution metadata from a notebook file.
///
/// Nulls `execution_count` on code cells and their outputs and removes the
/// per-cell `metadata.execution` timing block, then rewrites the file.
pub fn strip_execution_metadata(root: &Path, filename: &str) -> Result<()> {
    let path = root.join(filename);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read notebook: {}", path.display()))?;
    let mut notebook: Value = serde_json::from_str(&raw)
        .with_context(|| format!("notebook is not valid JSON: {}", path.display()))?;

    if let Some(cells) = notebook.get_mut("cells").and_then(Value::as_array_mut) {
        for cell in cells {
            strip_cell(cell);
        }
    }

    let mut serialized = serde_json::to_string_pretty(&notebook)
        .context("failed to serialize notebook")?;
    serialized.push('\n');
    std::fs::write(&path, serialized)
        .with_context(|| format!("failed to write notebook: {}", path.display()))
}

fn strip_cell(cell: &mut Value) {
    let is_code = cell.get("cell_type").and_then(Value::as_str) == Some("code");
    if !is_code {
        return;
    }

    if let Some(count) = cell.get_mut("execution_count") {
        *count = Value::Null;
    }
    if let Some(outputs) = cell.get_mut("outputs").and_then(Value::as_array_mut) {
        for output in outputs {
            if let Some(count) = output.get_mut("execution_count") {
                *count = Value::Null;
            }
        }
    }
    if let Some(metadata) = cell.get_mut("metadata").and_then(Value::as_object_mut) {
        metadata.remove("execution");
    }
}

/// Export a notebook to an HTML file.
///
/// With `exclude_source`, code cells are omitted from the output (figures and
/// tables only). The output path defaults to nbconvert's convention (the
/// notebook name with an `.html` extension).
pub fn export_html(
    root: &Path,
    filename: &str,
    exclude_source: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut args = vec!["nbconvert", "--to", "html"];
    if exclude_source {
        args.push("--no-input");
    }
    let output_str;
    if let Some(output) = output {
        output_str = output.to_string_lossy().into_owned();
        args.push("--output");
        args.push(&output_str);
    }
    args.push(filename);

    jupyter_at(root, &args)
        .with_context(|| format!("failed to export notebook: {}", filename))
}

/// Execute every registered notebook sequentially, stripping execution
/// metadata after each run. The first failure aborts; returns the number of
/// notebooks executed.
pub fn run_all(root: &Path) -> Result<usize> {
    let names = registry::load(root)?;
    for name in &names {
        execute(root, name)?;
        strip_execution_metadata(root, name)?;
    }
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTEBOOK: &str = r##"{
  "cells": [
    {
      "cell_type": "markdown",
      "metadata": {},
      "source": ["# Title"]
    },
    {
      "cell_type": "code",
      "execution_count": 7,
      "metadata": {
        "execution": {"iopub.execute_input": "2024-01-01T00:00:00Z"},
        "tags": []
      },
      "outputs": [
        {"output_type": "execute_result", "execution_count": 7, "data": {}}
      ],
      "source": ["1 + 1"]
    }
  ],
  "metadata": {},
  "nbformat": 4,
  "nbformat_minor": 5
}"##;

    #[test]
    fn test_strip_execution_metadata() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("nb.ipynb"), NOTEBOOK).expect("write notebook");

        strip_execution_metadata(dir.path(), "nb.ipynb").expect("strip");

        let raw = std::fs::read_to_string(dir.path().join("nb.ipynb")).expect("read");
        let notebook: Value = serde_json::from_str(&raw).expect("parse");
        let code_cell = &notebook["cells"][1];
        assert!(code_cell["execution_count"].is_null());
        assert!(code_cell["outputs"][0]["execution_count"].is_null());
        assert!(code_cell["metadata"].get("execution").is_none());
        // unrelated metadata survives
        assert!(code_cell["metadata"].get("tags").is_some());
        // markdown cell untouched
        assert_eq!(notebook["cells"][0]["cell_type"], "markdown");
    }

    #[test]
    fn test_strip_rejects_invalid_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("nb.ipynb"), "not json").expect("write notebook");
        assert!(strip_execution_metadata(dir.path(), "nb.ipynb").is_err());
    }

    #[test]
    fn test_run_all_empty_registry_is_noop() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert_eq!(run_all(dir.path()).expect("run"), 0);
    }
}
