//! Git collaborator
//!
//! Thin wrapper around the git CLI for repository-root discovery and hook
//! directory location. Git stays an external collaborator; no version-control
//! logic lives in the core.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Registry filename, fixed relative to the repository root.
pub const REGISTRY_FILE: &str = ".nbgrid.config.tsv";

/// Execute a git command in a specific directory and return the trimmed stdout
fn git_at(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .context("failed to invoke git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Repository root for the current working directory.
///
/// Hooks run from the repository root, but users invoke the CLI from
/// anywhere inside the repo, so the root is always resolved explicitly.
pub fn repo_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    repo_root_at(&cwd)
}

/// Repository root for a specific directory.
pub fn repo_root_at(dir: &Path) -> Result<PathBuf> {
    let root = git_at(dir, &["rev-parse", "--show-toplevel"])
        .context("not a git repository")?;
    Ok(PathBuf::from(root))
}

/// The `.git/hooks` directory under a repository root.
///
/// Fails if the directory does not exist (not a git repository).
pub fn hooks_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(".git").join("hooks");
    if !dir.is_dir() {
        anyhow::bail!("not a git repository: {} is missing", dir.display());
    }
    Ok(dir)
}

/// Path of the notebook registry under a repository root.
pub fn registry_path(root: &Path) -> PathBuf {
    root.join(REGISTRY_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_repo(dir: &Path) -> bool {
        Command::new("git")
            .current_dir(dir)
            .args(["init", "--quiet"])
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_repo_root_from_subdirectory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        if !init_repo(dir.path()) {
            eprintln!("Skipping test: git unavailable");
            return;
        }
        let sub = dir.path().join("notebooks");
        std::fs::create_dir(&sub).expect("create subdir");

        let root = repo_root_at(&sub).expect("resolve root");
        // canonicalize both sides: macOS tempdirs live behind /private symlinks
        assert_eq!(
            root.canonicalize().expect("canonicalize"),
            dir.path().canonicalize().expect("canonicalize")
        );
    }

    #[test]
    fn test_repo_root_outside_repository_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        // guard against the tempdir itself living inside a repo
        if repo_root_at(dir.path()).is_ok() {
            eprintln!("Skipping test: temp dir is inside a git repository");
            return;
        }
        assert!(repo_root_at(dir.path()).is_err());
    }

    #[test]
    fn test_hooks_dir_requires_git_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(hooks_dir(dir.path()).is_err());
        if init_repo(dir.path()) {
            assert!(hooks_dir(dir.path()).expect("hooks dir").ends_with("hooks"));
        }
    }
}
