//! Common test utilities and fixtures for distforge integration tests.

// Allow dead code because these utilities are shared across test binaries
// and not every binary uses all of them
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A manifest that exercises every section: catalog, install, plain and
/// composite extras.
pub const SAMPLE_MANIFEST: &str = r#"
[package]
name = "open-r1"
version = "0.1.0.dev0"
description = "Open R1"
license = "Apache"
requires-python = ">=3.10.9"

dependencies = [
    "accelerate",
    "distilabel[vllm,ray,openai]",
    "flake8",
    "isort",
    "lighteval @ git+https://github.com/huggingface/lighteval.git@ed084813",
    "math-verify",
    "parameterized",
    "pytest",
    "ruff",
    "torch",
    "trl",
]

install = ["accelerate", "trl"]

[extras]
tests = ["pytest", "parameterized", "math-verify"]
torch = ["torch"]
quality = ["ruff", "isort", "flake8"]
eval = ["lighteval", "math-verify"]
dev = { include = ["quality", "tests", "eval"] }
"#;

/// Temporary project directory for driving the distforge binary.
pub struct TestProject {
    // Keep alive for RAII cleanup
    temp: TempDir,
}

impl TestProject {
    /// Create an empty test project.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    /// Create a test project with the sample manifest and a readme.
    pub fn with_sample_manifest() -> Result<Self> {
        let project = Self::new()?;
        project.write_manifest(SAMPLE_MANIFEST)?;
        project.write_readme("# Open R1\n\nFully open reproduction of R1-style reasoning.\n")?;
        Ok(project)
    }

    /// Project root directory.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("distforge.toml")
    }

    /// Write the manifest file.
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        fs::write(self.manifest_path(), content)?;
        Ok(())
    }

    /// Write the readme file.
    pub fn write_readme(&self, content: &str) -> Result<()> {
        fs::write(self.path().join("README.md"), content)?;
        Ok(())
    }

    /// Create a stale `<name>.egg-info` directory with a marker file.
    pub fn create_stale_metadata(&self, package_name: &str) -> Result<PathBuf> {
        let dir = self.path().join(format!("{}.egg-info", package_name.replace('-', "_")));
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("PKG-INFO"), "Metadata-Version: 2.1")?;
        Ok(dir)
    }

    /// A distforge command running in the project directory.
    pub fn distforge_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("distforge").expect("distforge binary builds");
        cmd.current_dir(self.path());
        cmd
    }
}
