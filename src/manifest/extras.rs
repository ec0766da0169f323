//! Extras groups: named optional dependency subsets.
//!
//! An extras group is either a plain list of package names selected from the
//! catalog, or a composite group that concatenates other groups in order:
//!
//! ```toml
//! [extras]
//! tests = ["pytest", "parameterized", "math-verify"]
//! quality = ["ruff", "isort", "flake8"]
//! dev = { include = ["quality", "tests", "eval", "code"] }
//! ```
//!
//! Composite groups resolve depth-first; a group including itself (directly
//! or through another group) is rejected.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::DistforgeError;
use crate::manifest::catalog::DependencyCatalog;

/// Declaration of one extras group in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExtraSpec {
    /// Package names selected from the dependency catalog.
    Packages(Vec<String>),
    /// Concatenation of other extras groups, in include order.
    Composite {
        /// Names of the groups whose resolved contents are concatenated.
        include: Vec<String>,
    },
}

/// Resolve every extras group against the catalog.
///
/// Returns group name → ordered raw specifier strings. Plain groups resolve
/// by catalog lookup; composite groups concatenate the resolved contents of
/// the groups they include, preserving include order and any duplicates
/// (mirroring plain list concatenation).
///
/// # Errors
///
/// - [`DistforgeError::DependencyNotFound`] if a group names an undeclared
///   package
/// - [`DistforgeError::ExtraNotFound`] if a composite group includes a
///   group that does not exist
/// - [`DistforgeError::CircularExtras`] if composite groups include each
///   other in a cycle
pub fn resolve_extras(
    extras: &BTreeMap<String, ExtraSpec>,
    catalog: &DependencyCatalog,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut resolved = BTreeMap::new();
    let mut visiting = Vec::new();

    for name in extras.keys() {
        resolve_group(name, extras, catalog, &mut resolved, &mut visiting)?;
    }

    Ok(resolved)
}

fn resolve_group(
    name: &str,
    extras: &BTreeMap<String, ExtraSpec>,
    catalog: &DependencyCatalog,
    resolved: &mut BTreeMap<String, Vec<String>>,
    visiting: &mut Vec<String>,
) -> Result<Vec<String>> {
    if let Some(done) = resolved.get(name) {
        return Ok(done.clone());
    }

    if visiting.iter().any(|seen| seen == name) {
        let mut chain = visiting.clone();
        chain.push(name.to_string());
        return Err(DistforgeError::CircularExtras {
            chain: chain.join(" -> "),
        }
        .into());
    }

    let spec = extras.get(name).ok_or_else(|| DistforgeError::ExtraNotFound {
        name: name.to_string(),
    })?;

    visiting.push(name.to_string());
    let contents = match spec {
        ExtraSpec::Packages(names) => catalog.select_raw(names)?,
        ExtraSpec::Composite {
            include,
        } => {
            let mut combined = Vec::new();
            for included in include {
                combined.extend(resolve_group(included, extras, catalog, resolved, visiting)?);
            }
            combined
        }
    };
    visiting.pop();

    resolved.insert(name.to_string(), contents.clone());
    Ok(contents)
}
