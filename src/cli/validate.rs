//! Validate the manifest and report every problem found.
//!
//! Unlike `build`, which stops at the first error, `validate` runs each
//! check independently so one broken extras group does not hide a missing
//! readme:
//!
//! - manifest syntax (TOML parse)
//! - package metadata hygiene (name charset, version shape)
//! - dependency catalog (specifier grammar, duplicate names)
//! - install requirements (every name declared)
//! - extras groups (names declared, includes exist, no cycles)
//! - readme presence
//!
//! ```bash
//! distforge validate
//! distforge validate --format json
//! ```
//!
//! Exits non-zero when any check fails.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::core::DistforgeError;
use crate::manifest::{DependencyCatalog, Manifest, resolve_extras, resolve_manifest_path};

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidateFormat {
    /// Human-readable check list (default).
    Text,
    /// Machine-readable JSON report.
    Json,
}

/// Outcome of a single validation check.
#[derive(Debug, Serialize)]
struct CheckResult {
    /// What was checked.
    name: &'static str,
    /// Whether the check passed.
    passed: bool,
    /// Failure message, when the check did not pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            message: None,
        }
    }

    fn fail(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            message: Some(message.into()),
        }
    }
}

/// Command to validate the manifest configuration.
#[derive(Args)]
pub struct ValidateCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: ValidateFormat,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = resolve_manifest_path(manifest_path)?;

        let mut results = Vec::new();

        // Syntax first; the remaining checks need a parsed manifest
        let manifest = match Manifest::load_unchecked(&manifest_path) {
            Ok(manifest) => {
                results.push(CheckResult::pass("manifest syntax"));
                Some(manifest)
            }
            Err(e) => {
                results.push(CheckResult::fail("manifest syntax", e.to_string()));
                None
            }
        };

        if let Some(manifest) = &manifest {
            results.push(check("package metadata", manifest.validate_metadata()));

            let catalog = match DependencyCatalog::from_declarations(&manifest.dependencies) {
                Ok(catalog) => {
                    results.push(CheckResult::pass("dependency catalog"));
                    Some(catalog)
                }
                Err(e) => {
                    results.push(CheckResult::fail("dependency catalog", e.to_string()));
                    None
                }
            };

            if let Some(catalog) = &catalog {
                results.push(check(
                    "install requirements",
                    catalog.select_raw(&manifest.install).map(|_| ()),
                ));
                results.push(check(
                    "extras groups",
                    resolve_extras(&manifest.extras, catalog).map(|_| ()),
                ));
            }

            let readme = manifest.readme_path();
            if readme.is_file() {
                results.push(CheckResult::pass("readme"));
            } else {
                results.push(CheckResult::fail(
                    "readme",
                    format!("readme file not found: {}", readme.display()),
                ));
            }
        }

        let failed = results.iter().filter(|result| !result.passed).count();

        match self.format {
            ValidateFormat::Text => {
                println!("Validating {}", manifest_path.display());
                println!();
                for result in &results {
                    if result.passed {
                        println!("  {} {}", "✓".green(), result.name);
                    } else {
                        println!("  {} {}", "✗".red(), result.name);
                        if let Some(message) = &result.message {
                            println!("    {}", message.yellow());
                        }
                    }
                }
                println!();
                if failed == 0 {
                    println!("{}", "Manifest is valid".green().bold());
                } else {
                    println!("{}", format!("{failed} check(s) failed").red().bold());
                }
            }
            ValidateFormat::Json => {
                let report = serde_json::json!({
                    "manifest": manifest_path.display().to_string(),
                    "valid": failed == 0,
                    "checks": results,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        if failed > 0 {
            return Err(DistforgeError::ManifestValidationError {
                reason: format!("{failed} validation check(s) failed"),
            }
            .into());
        }

        Ok(())
    }
}

fn check(name: &'static str, outcome: Result<()>) -> CheckResult {
    match outcome {
        Ok(()) => CheckResult::pass(name),
        Err(e) => CheckResult::fail(name, e.to_string()),
    }
}
