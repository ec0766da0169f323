//! Initialize a new project with a distforge.toml manifest.
//!
//! The scaffold is a complete, working manifest for an LLM-reasoning
//! training and evaluation project: full dependency declaration list,
//! extras groups (including the composite `dev` group), and the base
//! install set. Edit it down for smaller projects.
//!
//! ```bash
//! distforge init
//! distforge init --path ./my-project
//! distforge init --force
//! ```
//!
//! The command refuses to overwrite an existing manifest unless `--force`
//! is given.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::constants::{DEFAULT_README, MANIFEST_FILENAME};
use crate::utils::fs::safe_write;

/// Scaffold manifest written by `distforge init`.
const MANIFEST_TEMPLATE: &str = r#"# distforge manifest
# All dependencies are declared here with their version requirements, if any.
# If a dependency is fast-moving (e.g. trl), pin it to an exact version.

[package]
name = "open-r1"
version = "0.1.0.dev0"
description = "Open R1"
authors = ["The Hugging Face team (past and future)"]
license = "Apache"
readme = "README.md"
homepage = "https://github.com/huggingface/open-r1"
keywords = ["llm", "inference-time compute", "reasoning"]
requires-python = ">=3.10.9"
package-dir = "src"
classifiers = [
    "Development Status :: 3 - Alpha",
    "Intended Audience :: Developers",
    "Intended Audience :: Education",
    "Intended Audience :: Science/Research",
    "License :: OSI Approved :: Apache Software License",
    "Operating System :: OS Independent",
    "Programming Language :: Python :: 3",
    "Programming Language :: Python :: 3.10",
    "Topic :: Scientific/Engineering :: Artificial Intelligence",
]

dependencies = [
    "accelerate",
    "bitsandbytes",
    "datasets",
    "deepspeed",
    "distilabel[vllm,ray,openai]",
    "e2b-code-interpreter",
    "einops",
    "flake8",
    "hf_transfer",
    "huggingface-hub[cli]",
    "isort",
    "langdetect",
    "latex2sympy2_extended",
    "liger_kernel",
    "lighteval @ git+https://github.com/huggingface/lighteval.git@ed084813e0bd12d82a06d9f913291fdbee774905",
    "math-verify",
    "packaging",
    "parameterized",
    "peft",
    "pytest",
    "python-dotenv",
    "ruff",
    "safetensors",
    "sentencepiece",
    "torch",
    "transformers",
    "trl",
    "vllm",
    "wandb",
]

# Core dependencies shared across the whole project - keep this to a bare minimum
install = [
    "accelerate",
    "bitsandbytes",
    "einops",
    "datasets",
    "deepspeed",
    "hf_transfer",
    "huggingface-hub",
    "langdetect",
    "latex2sympy2_extended",
    "math-verify",
    "liger_kernel",
    "packaging",
    "safetensors",
    "sentencepiece",
    "transformers",
    "trl",
    "wandb",
]

[extras]
tests = ["pytest", "parameterized", "math-verify"]
torch = ["torch"]
quality = ["ruff", "isort", "flake8"]
code = ["e2b-code-interpreter", "python-dotenv"]
eval = ["lighteval", "math-verify"]
dev = { include = ["quality", "tests", "eval", "code"] }
"#;

/// Command to initialize a new project with a manifest file.
#[derive(Args)]
pub struct InitCommand {
    /// Directory to create the manifest in (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Writes the scaffold manifest, creating the target directory if
    /// needed, and a stub readme when none exists (the scaffold references
    /// one for the long description).
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = match manifest_path {
            Some(path) => path,
            None => {
                self.path.clone().unwrap_or_else(|| PathBuf::from(".")).join(MANIFEST_FILENAME)
            }
        };

        if manifest_path.exists() && !self.force {
            return Err(anyhow!(
                "Manifest already exists at {}. Use --force to overwrite",
                manifest_path.display()
            ));
        }

        safe_write(&manifest_path, MANIFEST_TEMPLATE)?;

        let readme_path =
            manifest_path.parent().unwrap_or_else(|| std::path::Path::new(".")).join(DEFAULT_README);
        if !readme_path.exists() {
            fs::write(&readme_path, "# Open R1\n")?;
            tracing::debug!(path = %readme_path.display(), "wrote stub readme");
        }

        println!("{} Created manifest at {}", "✓".green(), manifest_path.display());
        println!();
        println!("Next steps:");
        println!("  1. Edit {} to declare your package", MANIFEST_FILENAME);
        println!("  2. Run {} to check it evaluates cleanly", "distforge validate".cyan());
        println!("  3. Run {} to render the distribution document", "distforge build".cyan());

        Ok(())
    }
}
