//! Dependency specifier parsing.
//!
//! A specifier is a single declaration string combining a package name with
//! optional extras and an optional constraint:
//!
//! ```text
//! torch
//! trl==0.14.0
//! distilabel[vllm,ray,openai]
//! huggingface-hub[cli]>=0.25
//! lighteval @ git+https://github.com/huggingface/lighteval.git@ed0848...
//! ```
//!
//! Parsing extracts the bare package name (everything before a bracketed
//! extras suffix or a comparator/space) while preserving the raw string
//! untouched, so the catalog can always hand the original declaration back
//! to the packaging tool.

use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::core::DistforgeError;

/// Accepted specifier shape: a name (no comparator, space or bracket
/// characters), an optional `[extras]` suffix, and an optional remainder
/// that must begin with a comparator character or a space.
static SPECIFIER_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([^!=<>~ \[\]]+)(?:\[([^\]]+)\])?([!=<>~ ].*)?$")
        .expect("specifier pattern is valid")
});

/// Constraint portion of a specifier, when present.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// A version constraint expression such as `==0.14.0` or `>=1,<2`.
    ///
    /// The expression is kept opaque: distforge selects and groups
    /// declarations, it does not resolve versions.
    Version(String),
    /// A direct reference (`name @ <url>`), typically a VCS URL.
    DirectReference(String),
}

/// A parsed dependency declaration.
///
/// The raw declaration string round-trips exactly: whatever appears in the
/// manifest's `dependencies` list is what lands in `install_requires` and
/// `extras_require`, byte for byte.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Specifier {
    /// The original declaration string, unmodified.
    pub raw: String,
    /// Bare package name used for catalog lookups.
    pub name: String,
    /// Extras requested of the dependency itself (the `[vllm,ray]` suffix).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    /// Version constraint or direct reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl Specifier {
    /// Parse a declaration string into its components.
    ///
    /// # Errors
    ///
    /// Returns [`DistforgeError::InvalidSpecifier`] when the string is empty
    /// or does not match the specifier shape (for example a declaration that
    /// starts with a comparator and has no name).
    pub fn parse(raw: &str) -> Result<Self, DistforgeError> {
        if raw.trim().is_empty() {
            return Err(DistforgeError::InvalidSpecifier {
                specifier: raw.to_string(),
                reason: "specifier is empty".to_string(),
            });
        }

        let captures =
            SPECIFIER_RE.captures(raw).ok_or_else(|| DistforgeError::InvalidSpecifier {
                specifier: raw.to_string(),
                reason: "does not match '<name>[extras]<constraint>'".to_string(),
            })?;

        let name = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| DistforgeError::InvalidSpecifier {
                specifier: raw.to_string(),
                reason: "missing package name".to_string(),
            })?;

        let extras = captures
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let constraint = captures.get(3).and_then(|m| parse_constraint(raw, m.as_str())).transpose()?;

        Ok(Self {
            raw: raw.to_string(),
            name,
            extras,
            constraint,
        })
    }

    /// Whether this specifier pins or constrains a version (or URL) at all.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }
}

/// Classify the trailing portion of a specifier.
///
/// A remainder starting with `@` (after whitespace) is a direct reference;
/// anything else is treated as an opaque version constraint expression. An
/// all-whitespace remainder means no constraint.
fn parse_constraint(raw: &str, tail: &str) -> Option<Result<Constraint, DistforgeError>> {
    let trimmed = tail.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(reference) = trimmed.strip_prefix('@') {
        let url = reference.trim();
        if url.is_empty() {
            return Some(Err(DistforgeError::InvalidSpecifier {
                specifier: raw.to_string(),
                reason: "direct reference '@' has no URL".to_string(),
            }));
        }
        return Some(Ok(Constraint::DirectReference(url.to_string())));
    }

    Some(Ok(Constraint::Version(trimmed.to_string())))
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
