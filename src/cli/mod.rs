//! Command-line interface for distforge.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `init` - scaffold a new distforge.toml manifest
//! - `build` - evaluate the manifest and render the distribution document
//! - `validate` - check the manifest and report every problem found
//! - `list` - display the dependency catalog or the resolved extras
//! - `clean` - remove the stale build-metadata directory
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - debug-level logging
//! - `--quiet` - errors only
//! - `--manifest-path` - explicit path to distforge.toml instead of walk-up
//!   discovery
//!
//! # Usage
//!
//! ```bash
//! # 1. Scaffold a project manifest
//! distforge init
//!
//! # 2. Check it evaluates cleanly
//! distforge validate
//!
//! # 3. Render the distribution document
//! distforge build --format json --output dist-metadata.json
//! ```

mod build;
mod clean;
mod init;
mod list;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Runtime configuration for CLI execution.
///
/// Holds settings that would otherwise be pushed straight into environment
/// variables, so tests and programmatic callers can control behavior
/// without touching global state until [`CliConfig::apply_to_env`] runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the `RUST_LOG` environment variable.
    ///
    /// `None` preserves whatever `RUST_LOG` is already set to.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this configuration to the process environment.
    ///
    /// Called exactly once at the start of execution, before the tracing
    /// subscriber is installed. Not thread-safe; must run before any other
    /// threads are spawned.
    pub fn apply_to_env(&self) {
        if let Some(ref level) = self.log_level {
            // set_var is safe here: we are single-threaded this early
            unsafe {
                std::env::set_var("RUST_LOG", level);
            }
        }
    }
}

/// Install the global tracing subscriber from the environment filter.
///
/// Safe to call more than once; later calls are ignored.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Top-level CLI parser for distforge.
#[derive(Parser)]
#[command(
    name = "distforge",
    about = "Distribution manifest builder - evaluate packaging manifests into installable metadata",
    version,
    long_about = "distforge evaluates a declarative distforge.toml manifest (package metadata, a \
                  flat dependency specifier list, extras groupings, and the base install set) \
                  into the distribution document a packaging tool consumes."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    ///
    /// Equivalent to RUST_LOG=debug. Mutually exclusive with --quiet.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    ///
    /// Ideal for scripts and CI pipelines. Mutually exclusive with
    /// --verbose.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the manifest file (distforge.toml)
    ///
    /// By default distforge searches the current directory and every parent
    /// directory. This option pins an exact path instead, for running
    /// commands from outside the project directory.
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with a distforge.toml manifest.
    Init(init::InitCommand),

    /// Evaluate the manifest and render the distribution document.
    ///
    /// Removes stale build metadata, builds the dependency catalog,
    /// resolves extras and install requirements, reads the readme, and
    /// writes the result as TOML or JSON.
    Build(build::BuildCommand),

    /// Validate the manifest and report every problem found.
    Validate(validate::ValidateCommand),

    /// List the dependency catalog or the resolved extras groups.
    List(list::ListCommand),

    /// Remove the stale build-metadata directory.
    Clean(clean::CleanCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// Verbose maps to debug-level logging, quiet to errors only, and the
    /// default to info.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute the CLI with an injected configuration.
    ///
    /// The single execution path for all entry points: applies the
    /// configuration to the environment, installs the tracing subscriber,
    /// and dispatches to the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply_to_env();
        init_tracing();

        match self.command {
            Commands::Init(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Build(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Validate(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::List(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Clean(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_verbose() {
        let cli = Cli::parse_from(["distforge", "--verbose", "list"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_build_config_quiet() {
        let cli = Cli::parse_from(["distforge", "--quiet", "list"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("error"));
    }

    #[test]
    fn test_build_config_default_preserves_env() {
        let cli = Cli::parse_from(["distforge", "list"]);
        assert!(cli.build_config().log_level.is_none());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["distforge", "--verbose", "--quiet", "list"]);
        assert!(result.is_err());
    }
}
