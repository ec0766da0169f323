//! Remove the stale build-metadata directory.
//!
//! Standalone entry point for the cleanup `build` performs automatically.
//!
//! ```bash
//! distforge clean
//! distforge clean --dry-run
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::artifacts::{clean_stale_artifacts, stale_metadata_dir};
use crate::manifest::{Manifest, resolve_manifest_path};

/// Command to remove stale build metadata.
#[derive(Args)]
pub struct CleanCommand {
    /// Report what would be removed without removing it
    #[arg(long)]
    dry_run: bool,
}

impl CleanCommand {
    /// Execute the clean command.
    ///
    /// Loads the manifest without validation; a manifest with a broken
    /// extras group should not block cleanup.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = resolve_manifest_path(manifest_path)?;
        let manifest = Manifest::load_unchecked(&manifest_path)?;
        let project_dir = manifest.project_dir();

        if self.dry_run {
            let stale_dir = stale_metadata_dir(&project_dir, &manifest.package.name);
            if stale_dir.exists() {
                println!("Would remove {}", stale_dir.display());
            } else {
                println!("Nothing to remove");
            }
            return Ok(());
        }

        match clean_stale_artifacts(&project_dir, &manifest.package.name)? {
            Some(removed) => println!("{} Removed {}", "✓".green(), removed.display()),
            None => println!("Nothing to remove"),
        }

        Ok(())
    }
}
