//! Evaluate the manifest and render the distribution document.
//!
//! The build is a single pass: remove stale build metadata, load and
//! validate the manifest, resolve the dependency sections, read the readme,
//! and render the result. Output goes to stdout by default or atomically to
//! a file with `--output`.
//!
//! ```bash
//! distforge build
//! distforge build --format json --output dist-metadata.json
//! distforge build --keep-stale
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::artifacts::clean_stale_artifacts;
use crate::manifest::{Manifest, resolve_manifest_path};
use crate::metadata::build_distribution;
use crate::utils::fs::safe_write;

/// Output format for the rendered distribution document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildFormat {
    /// Pretty-printed TOML (default).
    Toml,
    /// Pretty-printed JSON.
    Json,
}

/// Command to evaluate the manifest and render the distribution document.
#[derive(Args)]
pub struct BuildCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "toml")]
    format: BuildFormat,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the stale build-metadata cleanup
    #[arg(long)]
    keep_stale: bool,
}

impl BuildCommand {
    /// Execute the build command.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = resolve_manifest_path(manifest_path)?;
        let manifest = Manifest::load(&manifest_path)?;
        tracing::info!(
            package = %manifest.package.name,
            manifest = %manifest_path.display(),
            "evaluating manifest"
        );

        if !self.keep_stale {
            clean_stale_artifacts(&manifest.project_dir(), &manifest.package.name)?;
        }

        let distribution = build_distribution(&manifest)?;
        let rendered = match self.format {
            BuildFormat::Toml => distribution.to_toml_string()?,
            BuildFormat::Json => distribution.to_json_string()?,
        };

        match &self.output {
            Some(path) => {
                safe_write(path, &rendered)?;
                println!(
                    "{} Wrote distribution metadata for {} {} to {}",
                    "✓".green(),
                    distribution.name.bold(),
                    distribution.version,
                    path.display()
                );
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}
