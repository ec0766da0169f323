//! Name-keyed dependency catalog.
//!
//! The catalog is the lookup table at the center of manifest evaluation:
//! every declaration from the `dependencies` list is parsed once and indexed
//! by its bare package name. Extras groups and the install list select from
//! it by name; a name that was never declared is a hard error, as is a name
//! declared twice.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::DistforgeError;
use crate::manifest::specifier::Specifier;

/// Immutable mapping from package name to parsed specifier.
///
/// Built once from the manifest's declaration list and never mutated
/// afterwards. Iteration order is sorted by package name so every rendering
/// of the catalog is deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyCatalog {
    entries: BTreeMap<String, Specifier>,
}

impl DependencyCatalog {
    /// Build the catalog from a flat list of declaration strings.
    ///
    /// Each declaration is parsed into a [`Specifier`] and indexed under its
    /// bare name.
    ///
    /// # Errors
    ///
    /// - [`DistforgeError::InvalidSpecifier`] if a declaration does not
    ///   parse
    /// - [`DistforgeError::DuplicateDependency`] if two declarations
    ///   normalize to the same package name
    pub fn from_declarations<I, S>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: BTreeMap<String, Specifier> = BTreeMap::new();

        for declaration in declarations {
            let spec = Specifier::parse(declaration.as_ref())?;
            if let Some(existing) = entries.get(&spec.name) {
                return Err(DistforgeError::DuplicateDependency {
                    name: spec.name.clone(),
                    existing: existing.raw.clone(),
                    duplicate: spec.raw,
                }
                .into());
            }
            entries.insert(spec.name.clone(), spec);
        }

        Ok(Self {
            entries,
        })
    }

    /// Look up a specifier by package name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Specifier> {
        self.entries.get(name)
    }

    /// Whether the catalog declares the given package name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Select specifiers by name, preserving the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`DistforgeError::DependencyNotFound`] for the first name
    /// that was never declared.
    pub fn select<'a, I, S>(&self, names: I) -> Result<Vec<&Specifier>>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + 'a,
    {
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.entries.get(name).ok_or_else(|| {
                    DistforgeError::DependencyNotFound {
                        name: name.to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Select declarations by name, returning the raw specifier strings.
    ///
    /// This is the form handed to the packaging tool: the original
    /// declaration strings, in the requested order.
    pub fn select_raw<'a, I, S>(&self, names: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + 'a,
    {
        Ok(self.select(names)?.into_iter().map(|spec| spec.raw.clone()).collect())
    }

    /// Number of declared dependencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, specifier)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Specifier)> {
        self.entries.iter()
    }
}
