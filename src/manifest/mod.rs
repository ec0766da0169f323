//! Manifest parsing, validation, and evaluation (distforge.toml).
//!
//! The manifest is the single input to distforge. It declares the package
//! metadata, the flat dependency specifier list, the base install set, and
//! the extras groups:
//!
//! ```toml
//! [package]
//! name = "open-r1"
//! version = "0.1.0.dev0"
//! description = "Open R1"
//! license = "Apache"
//! requires-python = ">=3.10.9"
//!
//! dependencies = [
//!     "accelerate",
//!     "distilabel[vllm,ray,openai]",
//!     "trl",
//! ]
//!
//! install = ["accelerate", "trl"]
//!
//! [extras]
//! tests = ["pytest"]
//! dev = { include = ["tests"] }
//! ```
//!
//! Evaluation is a single construction pass: [`Manifest::load`] parses and
//! validates, [`Manifest::resolve`] builds the immutable
//! [`DependencyCatalog`], resolves every extras group, and selects the
//! install requirements. Nothing is mutated afterwards and nothing happens
//! at load time beyond reading the one file.

pub mod catalog;
pub mod extras;
pub mod specifier;

pub use catalog::DependencyCatalog;
pub use extras::{ExtraSpec, resolve_extras};
pub use specifier::{Constraint, Specifier};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_README, MANIFEST_FILENAME};
use crate::core::DistforgeError;
use crate::utils::fs::safe_write;

/// Package metadata declared under `[package]`.
///
/// Field names follow the manifest's TOML conventions (`requires-python`,
/// `package-dir`); the rendered distribution document maps them onto the
/// names the packaging tool expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackageMetadata {
    /// Distribution name, e.g. `open-r1`.
    pub name: String,

    /// Version string. Dot-separated, no dashes: `x.y.z`, `x.y.z.dev0`,
    /// or `x.y.z.rc1`.
    pub version: String,

    /// One-line description.
    #[serde(default)]
    pub description: String,

    /// Authors, free-form strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// License identifier, e.g. `Apache`.
    #[serde(default)]
    pub license: String,

    /// Readme file, relative to the manifest directory. Its contents become
    /// the distribution long description.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Project homepage URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Keywords describing the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Interpreter requirement, e.g. `>=3.10.9`.
    #[serde(default, rename = "requires-python", skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,

    /// Source root containing the package tree, e.g. `src`.
    #[serde(default = "default_package_dir", rename = "package-dir")]
    pub package_dir: String,

    /// Trove classifiers, passed through verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
}

fn default_readme() -> String {
    DEFAULT_README.to_string()
}

fn default_package_dir() -> String {
    "src".to_string()
}

/// A parsed distforge manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Package metadata.
    pub package: PackageMetadata,

    /// Master dependency declaration list. Every name used anywhere else in
    /// the manifest must resolve to exactly one entry here.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Names of the dependencies always installed, in install order.
    #[serde(default)]
    pub install: Vec<String>,

    /// Optional dependency groups a consumer may opt into.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, ExtraSpec>,

    /// Directory containing the manifest file, for resolving relative paths.
    /// Populated on load; never serialized.
    #[serde(skip)]
    pub manifest_dir: Option<PathBuf>,
}

/// Result of a full manifest evaluation pass.
///
/// All three parts are constructed together in one pass and are immutable:
/// the catalog indexes every declaration, `extras` holds every resolved
/// group, and `install_requires` is the base install set as raw specifier
/// strings.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedManifest {
    /// Name-keyed specifier lookup table.
    pub catalog: DependencyCatalog,
    /// Resolved extras: group name to ordered raw specifier strings.
    pub extras: BTreeMap<String, Vec<String>>,
    /// Base install set as raw specifier strings, in declaration order.
    pub install_requires: Vec<String>,
}

impl Manifest {
    /// Load and parse a manifest from a TOML file.
    ///
    /// The file is read, parsed, and validated in one step; either a valid
    /// manifest comes back or an error does. The manifest directory is
    /// recorded for resolving the readme path later.
    ///
    /// # Errors
    ///
    /// - [`DistforgeError::ManifestParseError`] for TOML syntax or shape
    ///   problems
    /// - [`DistforgeError::ManifestValidationError`] and the specifier and
    ///   lookup errors from [`Manifest::validate`]
    pub fn load(path: &Path) -> Result<Self> {
        let manifest = Self::load_unchecked(path)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and parse a manifest without validating it.
    ///
    /// Used where partial evaluation is wanted: `distforge validate` runs
    /// each check individually so it can report all of them, and
    /// `distforge clean` only needs the package name.
    pub fn load_unchecked(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let mut manifest: Self =
            toml::from_str(&content).map_err(|e| DistforgeError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        manifest.manifest_dir = Some(
            path.parent()
                .ok_or_else(|| anyhow::anyhow!("Manifest path has no parent directory"))?
                .to_path_buf(),
        );

        Ok(manifest)
    }

    /// Serialize the manifest back to TOML and write it atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(DistforgeError::from)?;
        safe_write(path, &content)
    }

    /// Validate metadata hygiene and evaluate the dependency sections.
    ///
    /// Called automatically by [`Manifest::load`]; also usable on
    /// programmatically constructed manifests.
    ///
    /// # Validation Rules
    ///
    /// - `package.name` is non-empty and uses only alphanumerics, `-`, `_`
    ///   and `.`
    /// - `package.version` is non-empty, dot-separated, and contains no
    ///   dashes
    /// - `package.package-dir` is non-empty
    /// - every declaration parses, names are unique, and every name in
    ///   `install` and `[extras]` resolves against the catalog
    pub fn validate(&self) -> Result<()> {
        self.validate_metadata()?;
        self.resolve().map(|_| ())
    }

    /// Validate the `[package]` metadata rules on their own.
    pub fn validate_metadata(&self) -> Result<()> {
        let name = &self.package.name;
        if name.is_empty() {
            return Err(DistforgeError::ManifestValidationError {
                reason: "package.name must not be empty".to_string(),
            }
            .into());
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
            return Err(DistforgeError::ManifestValidationError {
                reason: format!(
                    "package.name '{name}' may only contain alphanumerics, '-', '_' and '.'"
                ),
            }
            .into());
        }

        let version = &self.package.version;
        if version.is_empty() {
            return Err(DistforgeError::ManifestValidationError {
                reason: "package.version must not be empty".to_string(),
            }
            .into());
        }
        // Expected shape is x.y.z, x.y.z.dev0 or x.y.z.rc1 - dots, not dashes
        if version.contains('-') {
            return Err(DistforgeError::ManifestValidationError {
                reason: format!(
                    "package.version '{version}' must not contain dashes (use 'x.y.z.dev0', not 'x.y.z-dev0')"
                ),
            }
            .into());
        }
        if !version.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
            return Err(DistforgeError::ManifestValidationError {
                reason: format!("package.version '{version}' contains invalid characters"),
            }
            .into());
        }

        if self.package.package_dir.is_empty() {
            return Err(DistforgeError::ManifestValidationError {
                reason: "package.package-dir must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Evaluate the dependency sections into a [`ResolvedManifest`].
    ///
    /// This is the single-pass transformation at the core of distforge:
    /// parse the declaration list into the catalog, resolve every extras
    /// group (composites after the groups they include), and select the
    /// install requirements by name.
    pub fn resolve(&self) -> Result<ResolvedManifest> {
        let catalog = DependencyCatalog::from_declarations(&self.dependencies)?;
        let extras = resolve_extras(&self.extras, &catalog)?;
        let install_requires = catalog.select_raw(&self.install)?;

        Ok(ResolvedManifest {
            catalog,
            extras,
            install_requires,
        })
    }

    /// Absolute path of the readme file named by `package.readme`.
    ///
    /// Resolves against the manifest directory when known.
    #[must_use]
    pub fn readme_path(&self) -> PathBuf {
        match &self.manifest_dir {
            Some(dir) => dir.join(&self.package.readme),
            None => PathBuf::from(&self.package.readme),
        }
    }

    /// Directory the manifest lives in, defaulting to the current directory
    /// for manifests constructed in memory.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.manifest_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Locate `distforge.toml` starting from `start` and walking up.
///
/// # Errors
///
/// Returns [`DistforgeError::ManifestNotFound`] when no manifest exists in
/// `start` or any ancestor directory.
pub fn find_manifest_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return Err(DistforgeError::ManifestNotFound.into()),
        }
    }
}

/// Resolve the manifest path for a CLI invocation.
///
/// An explicit `--manifest-path` wins; otherwise the manifest is discovered
/// by walking up from the current working directory.
pub fn resolve_manifest_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if path.is_file() {
                Ok(path)
            } else {
                Err(DistforgeError::FileSystemError {
                    operation: "reading manifest".to_string(),
                    path: path.display().to_string(),
                }
                .into())
            }
        }
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            find_manifest_from(&cwd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[package]
name = "demo"
version = "0.1.0"

dependencies = ["torch", "trl==0.14.0"]
install = ["torch"]

[extras]
train = ["trl"]
"#;

    fn write_manifest(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(MANIFEST_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_minimal_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), MINIMAL);

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.package.name, "demo");
        assert_eq!(manifest.package.readme, DEFAULT_README);
        assert_eq!(manifest.package.package_dir, "src");
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.manifest_dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), "[package\nname = demo");

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DistforgeError>(),
            Some(DistforgeError::ManifestParseError { .. })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_install_name() {
        let temp = TempDir::new().unwrap();
        let content = r#"
[package]
name = "demo"
version = "0.1.0"

dependencies = ["torch"]
install = ["nonexistent-package"]
"#;
        let path = write_manifest(temp.path(), content);

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DistforgeError>(),
            Some(DistforgeError::DependencyNotFound { name }) if name == "nonexistent-package"
        ));
    }

    #[test]
    fn test_validate_rejects_dashed_version() {
        let temp = TempDir::new().unwrap();
        let content = r#"
[package]
name = "demo"
version = "0.1.0-dev0"
"#;
        let path = write_manifest(temp.path(), content);

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DistforgeError>(),
            Some(DistforgeError::ManifestValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_dev_and_rc_versions() {
        for version in ["0.1.0", "0.1.0.dev0", "1.2.3.rc1"] {
            let temp = TempDir::new().unwrap();
            let content = format!("[package]\nname = \"demo\"\nversion = \"{version}\"\n");
            let path = write_manifest(temp.path(), &content);
            assert!(Manifest::load(&path).is_ok(), "version {version} should be accepted");
        }
    }

    #[test]
    fn test_validate_rejects_bad_package_name() {
        let temp = TempDir::new().unwrap();
        let content = r#"
[package]
name = "demo/evil"
version = "0.1.0"
"#;
        let path = write_manifest(temp.path(), content);
        assert!(Manifest::load(&path).is_err());
    }

    #[test]
    fn test_resolve_builds_all_three_parts() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), MINIMAL);
        let manifest = Manifest::load(&path).unwrap();

        let resolved = manifest.resolve().unwrap();
        assert_eq!(resolved.catalog.len(), 2);
        assert_eq!(resolved.install_requires, vec!["torch".to_string()]);
        assert_eq!(resolved.extras["train"], vec!["trl==0.14.0".to_string()]);
    }

    #[test]
    fn test_install_requires_only_declared_entries() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), MINIMAL);
        let manifest = Manifest::load(&path).unwrap();

        let resolved = manifest.resolve().unwrap();
        for raw in &resolved.install_requires {
            assert!(manifest.dependencies.contains(raw));
        }
    }

    #[test]
    fn test_find_manifest_walks_up() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), MINIMAL);
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_manifest_from(&nested).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_find_manifest_missing_errors() {
        let temp = TempDir::new().unwrap();
        let err = find_manifest_from(temp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DistforgeError>(),
            Some(DistforgeError::ManifestNotFound)
        ));
    }

    #[test]
    fn test_save_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), MINIMAL);
        let manifest = Manifest::load(&path).unwrap();

        let out = temp.path().join("copy").join(MANIFEST_FILENAME);
        manifest.save(&out).unwrap();

        let reloaded = Manifest::load(&out).unwrap();
        assert_eq!(reloaded.package, manifest.package);
        assert_eq!(reloaded.dependencies, manifest.dependencies);
        assert_eq!(reloaded.install, manifest.install);
        assert_eq!(reloaded.extras, manifest.extras);
    }
}
