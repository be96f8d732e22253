//! Pre-commit hook management
//!
//! Installs a small shell script into `.git/hooks/pre-commit` that re-runs
//! all registered notebooks before each commit. Install refuses to clobber an
//! existing hook unless forced; uninstalling a missing hook is an error the
//! CLI reports without a crash.

use crate::git::hooks_dir;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// The installed hook script. Git executes hooks from the repository root.
pub const HOOK_SCRIPT: &str = "#!/bin/sh\n# Re-run registered summary notebooks before committing.\nexec nbgrid run\n";

/// Path of the pre-commit hook under a repository root.
pub fn hook_path(root: &Path) -> Result<PathBuf> {
    Ok(hooks_dir(root)?.join("pre-commit"))
}

/// Install the pre-commit hook.
///
/// Fails if a hook already exists, unless `force` is set. The script is made
/// executable for the owner and readable for group and others.
pub fn install(root: &Path, force: bool) -> Result<()> {
    let path = hook_path(root)?;
    if path.exists() && !force {
        bail!(
            "a pre-commit hook already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, HOOK_SCRIPT)
        .with_context(|| format!("failed to write hook: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o744))
            .with_context(|| format!("failed to set hook permissions: {}", path.display()))?;
    }

    Ok(())
}

/// Remove the pre-commit hook. A missing hook is an error.
pub fn uninstall(root: &Path) -> Result<()> {
    let path = hook_path(root)?;
    if !path.exists() {
        bail!("no pre-commit hook installed");
    }
    std::fs::remove_file(&path)
        .with_context(|| format!("failed to remove hook: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join(".git").join("hooks"))
            .expect("create hooks dir");
        dir
    }

    #[test]
    fn test_install_writes_executable_script() {
        let dir = fake_repo();
        install(dir.path(), false).expect("install");

        let path = hook_path(dir.path()).expect("hook path");
        let script = std::fs::read_to_string(&path).expect("read hook");
        assert_eq!(script, HOOK_SCRIPT);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).expect("stat hook").permissions().mode();
            assert_eq!(mode & 0o777, 0o744);
        }
    }

    #[test]
    fn test_install_refuses_to_clobber() {
        let dir = fake_repo();
        let path = hook_path(dir.path()).expect("hook path");
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write existing hook");

        assert!(install(dir.path(), false).is_err());

        install(dir.path(), true).expect("forced install");
        assert_eq!(std::fs::read_to_string(&path).expect("read hook"), HOOK_SCRIPT);
    }

    #[test]
    fn test_uninstall_round_trip() {
        let dir = fake_repo();
        install(dir.path(), false).expect("install");
        uninstall(dir.path()).expect("uninstall");
        assert!(!hook_path(dir.path()).expect("hook path").exists());
    }

    #[test]
    fn test_uninstall_missing_hook_fails() {
        let dir = fake_repo();
        assert!(uninstall(dir.path()).is_err());
    }

    #[test]
    fn test_outside_repository_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(install(dir.path(), false).is_err());
        assert!(uninstall(dir.path()).is_err());
    }
}
