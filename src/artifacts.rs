//! Stale build-metadata cleanup.
//!
//! Python packaging tools generate an `<package_name>.egg-info` directory
//! next to the manifest. A stale copy left by a previous build can shadow
//! the package during editable installs
//! (<https://github.com/pypa/pip/issues/5466>), so `distforge build` removes
//! it before evaluating the manifest. The removal is an explicit operation
//! rather than a side effect of loading anything: `distforge clean` runs it
//! standalone, and `build --keep-stale` skips it.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::constants::METADATA_DIR_SUFFIX;

/// Path of the build-metadata directory for a package.
///
/// The directory name is the package name with dashes replaced by
/// underscores, plus the `.egg-info` suffix: `open-r1` maps to
/// `open_r1.egg-info`.
#[must_use]
pub fn stale_metadata_dir(project_dir: &Path, package_name: &str) -> PathBuf {
    let dir_name = format!("{}{}", package_name.replace('-', "_"), METADATA_DIR_SUFFIX);
    project_dir.join(dir_name)
}

/// Remove the stale build-metadata directory if it exists.
///
/// Prints a warning before removing, since the directory occasionally holds
/// state a user expected to inspect. Returns the removed path, or `None`
/// when there was nothing to remove.
///
/// # Errors
///
/// Propagates the removal failure (e.g. insufficient permissions) as a
/// fatal error; a build must not proceed past a cleanup it could not
/// perform.
pub fn clean_stale_artifacts(project_dir: &Path, package_name: &str) -> Result<Option<PathBuf>> {
    let stale_dir = stale_metadata_dir(project_dir, package_name);

    if !stale_dir.exists() {
        tracing::debug!(path = %stale_dir.display(), "no stale build metadata to remove");
        return Ok(None);
    }

    tracing::warn!(path = %stale_dir.display(), "removing stale build metadata");
    println!(
        "{}: {} exists and may prevent installing in editable mode.\n\
         This directory is generated by packaging tools and will be removed now.\n\
         See https://github.com/pypa/pip/issues/5466 for details.",
        "warning".yellow().bold(),
        stale_dir.display()
    );

    std::fs::remove_dir_all(&stale_dir)
        .with_context(|| format!("Failed to remove stale directory: {}", stale_dir.display()))?;

    Ok(Some(stale_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_metadata_dir_name_uses_underscores() {
        let dir = stale_metadata_dir(Path::new("/project"), "open-r1");
        assert_eq!(dir, Path::new("/project/open_r1.egg-info"));
    }

    #[test]
    fn test_clean_removes_existing_directory() {
        let temp = TempDir::new().unwrap();
        let stale = temp.path().join("open_r1.egg-info");
        std::fs::create_dir(&stale).unwrap();
        std::fs::write(stale.join("PKG-INFO"), "Metadata-Version: 2.1").unwrap();

        let removed = clean_stale_artifacts(temp.path(), "open-r1").unwrap();
        assert_eq!(removed, Some(stale.clone()));
        assert!(!stale.exists());
    }

    #[test]
    fn test_clean_is_a_noop_without_stale_directory() {
        let temp = TempDir::new().unwrap();
        let removed = clean_stale_artifacts(temp.path(), "open-r1").unwrap();
        assert_eq!(removed, None);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("demo.egg-info")).unwrap();

        assert!(clean_stale_artifacts(temp.path(), "demo").unwrap().is_some());
        assert!(clean_stale_artifacts(temp.path(), "demo").unwrap().is_none());
    }
}
