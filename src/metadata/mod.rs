//! Distribution document rendering.
//!
//! A [`Distribution`] is the output of a full manifest evaluation: the
//! package metadata, the long description read from the readme, the base
//! install set, and every resolved extras group, in the field names a
//! packaging tool consumes (`install_requires`, `extras_require`,
//! `python_requires`). It serializes to TOML or JSON.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::README_CONTENT_TYPE;
use crate::core::DistforgeError;
use crate::manifest::Manifest;

/// Fully rendered distribution metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    /// Distribution name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Long description, read from the manifest's readme file.
    pub long_description: String,
    /// Content type of the long description.
    pub long_description_content_type: String,
    /// Authors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// License identifier.
    pub license: String,
    /// Keywords.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Project homepage URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Interpreter requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_requires: Option<String>,
    /// Source root containing the package tree.
    pub package_dir: String,
    /// Trove classifiers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
    /// Mandatory dependencies, as raw specifier strings.
    pub install_requires: Vec<String>,
    /// Optional dependency groups, as raw specifier strings.
    pub extras_require: BTreeMap<String, Vec<String>>,
}

impl Distribution {
    /// Render the distribution document as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(DistforgeError::from)?)
    }

    /// Render the distribution document as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(DistforgeError::from)?)
    }
}

/// Evaluate a manifest into a [`Distribution`].
///
/// Resolves the dependency sections and reads the readme file for the long
/// description.
///
/// # Errors
///
/// Propagates every evaluation error from [`Manifest::resolve`], and
/// returns [`DistforgeError::ReadmeNotFound`] when the readme named by
/// `package.readme` does not exist.
pub fn build_distribution(manifest: &Manifest) -> Result<Distribution> {
    let resolved = manifest.resolve()?;

    let readme_path = manifest.readme_path();
    if !readme_path.is_file() {
        return Err(DistforgeError::ReadmeNotFound {
            path: readme_path.display().to_string(),
        }
        .into());
    }
    let long_description = crate::utils::fs::read_text(&readme_path)?;

    let package = &manifest.package;
    Ok(Distribution {
        name: package.name.clone(),
        version: package.version.clone(),
        description: package.description.clone(),
        long_description,
        long_description_content_type: README_CONTENT_TYPE.to_string(),
        authors: package.authors.clone(),
        license: package.license.clone(),
        keywords: package.keywords.clone(),
        url: package.homepage.clone(),
        python_requires: package.requires_python.clone(),
        package_dir: package.package_dir.clone(),
        classifiers: package.classifiers.clone(),
        install_requires: resolved.install_requires,
        extras_require: resolved.extras,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MANIFEST_FILENAME;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[package]
name = "open-r1"
version = "0.1.0.dev0"
description = "Open R1"
license = "Apache"
requires-python = ">=3.10.9"

dependencies = ["accelerate", "torch", "trl"]
install = ["accelerate", "trl"]

[extras]
torch = ["torch"]
"#;

    fn project_with_readme(readme: &str) -> (TempDir, Manifest) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILENAME), MANIFEST).unwrap();
        std::fs::write(temp.path().join("README.md"), readme).unwrap();
        let manifest = Manifest::load(&temp.path().join(MANIFEST_FILENAME)).unwrap();
        (temp, manifest)
    }

    #[test]
    fn test_build_distribution_reads_readme() {
        let (_temp, manifest) = project_with_readme("# Open R1\n\nreasoning recipes\n");
        let dist = build_distribution(&manifest).unwrap();

        assert_eq!(dist.name, "open-r1");
        assert_eq!(dist.long_description, "# Open R1\n\nreasoning recipes\n");
        assert_eq!(dist.long_description_content_type, "text/markdown");
        assert_eq!(dist.python_requires.as_deref(), Some(">=3.10.9"));
        assert_eq!(dist.install_requires, vec!["accelerate".to_string(), "trl".to_string()]);
        assert_eq!(dist.extras_require["torch"], vec!["torch".to_string()]);
    }

    #[test]
    fn test_build_distribution_missing_readme_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILENAME), MANIFEST).unwrap();
        let manifest = Manifest::load(&temp.path().join(MANIFEST_FILENAME)).unwrap();

        let err = build_distribution(&manifest).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DistforgeError>(),
            Some(DistforgeError::ReadmeNotFound { .. })
        ));
    }

    #[test]
    fn test_distribution_serializes_to_both_formats() {
        let (_temp, manifest) = project_with_readme("readme body");
        let dist = build_distribution(&manifest).unwrap();

        let as_toml = dist.to_toml_string().unwrap();
        assert!(as_toml.contains("name = \"open-r1\""));
        assert!(as_toml.contains("install_requires"));

        let as_json = dist.to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&as_json).unwrap();
        assert_eq!(value["version"], "0.1.0.dev0");
        assert_eq!(value["extras_require"]["torch"][0], "torch");
    }
}
