//! distforge CLI entry point.
//!
//! Parses command-line arguments, executes the selected command, and turns
//! failures into user-friendly error output:
//! - `init` - scaffold a distforge.toml manifest
//! - `build` - evaluate the manifest into a distribution document
//! - `validate` - check the manifest and report every problem
//! - `list` - display the dependency catalog or resolved extras
//! - `clean` - remove stale build metadata

use anyhow::Result;
use clap::Parser;
use distforge::cli;
use distforge::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
