//! List the dependency catalog or the resolved extras groups.
//!
//! ```bash
//! distforge list                      # declared dependencies, table form
//! distforge list --extras             # resolved extras groups
//! distforge list --format json        # machine-readable
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::manifest::{Constraint, Manifest, resolve_manifest_path};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned table (default).
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Command to display the evaluated manifest contents.
#[derive(Args)]
pub struct ListCommand {
    /// List resolved extras groups instead of the dependency catalog
    #[arg(long)]
    extras: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: ListFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = resolve_manifest_path(manifest_path)?;
        let manifest = Manifest::load(&manifest_path)?;
        let resolved = manifest.resolve()?;

        if self.extras {
            match self.format {
                ListFormat::Table => {
                    println!(
                        "Extras groups for {} ({})",
                        manifest.package.name.bold(),
                        resolved.extras.len()
                    );
                    for (group, entries) in &resolved.extras {
                        println!();
                        println!("  {}", group.cyan().bold());
                        for entry in entries {
                            println!("    {entry}");
                        }
                    }
                }
                ListFormat::Json => {
                    let report = serde_json::json!({
                        "package": manifest.package.name,
                        "extras": resolved.extras,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            return Ok(());
        }

        match self.format {
            ListFormat::Table => {
                println!(
                    "Declared dependencies for {} ({})",
                    manifest.package.name.bold(),
                    resolved.catalog.len()
                );
                println!();
                println!("  {:<28} {:<22} {}", "Name".bold(), "Constraint".bold(), "Extras".bold());
                for (name, spec) in resolved.catalog.iter() {
                    let constraint = match &spec.constraint {
                        Some(Constraint::Version(v)) => v.clone(),
                        Some(Constraint::DirectReference(url)) => format!("@ {url}"),
                        None => "-".to_string(),
                    };
                    let extras = if spec.extras.is_empty() {
                        "-".to_string()
                    } else {
                        spec.extras.join(",")
                    };
                    println!("  {name:<28} {constraint:<22} {extras}");
                }
            }
            ListFormat::Json => {
                let entries: Vec<_> = resolved.catalog.iter().map(|(_, spec)| spec).collect();
                let report = serde_json::json!({
                    "package": manifest.package.name,
                    "dependencies": entries,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        Ok(())
    }
}
