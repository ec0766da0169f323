//! Error handling for distforge.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`DistforgeError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! # Error Categories
//!
//! - **Specifiers**: [`DistforgeError::InvalidSpecifier`],
//!   [`DistforgeError::DuplicateDependency`]
//! - **Lookups**: [`DistforgeError::DependencyNotFound`],
//!   [`DistforgeError::ExtraNotFound`], [`DistforgeError::CircularExtras`]
//! - **Manifest**: [`DistforgeError::ManifestNotFound`],
//!   [`DistforgeError::ManifestParseError`],
//!   [`DistforgeError::ManifestValidationError`]
//! - **Filesystem**: [`DistforgeError::ReadmeNotFound`],
//!   [`DistforgeError::FileSystemError`], [`DistforgeError::PermissionDenied`]
//!
//! Common standard library and parser errors convert automatically:
//! [`std::io::Error`], [`toml::de::Error`], [`toml::ser::Error`] and
//! [`serde_json::Error`] all map into [`DistforgeError`] variants via `#[from]`.
//!
//! Every failure in distforge is fatal-and-surfaced: a manifest that does not
//! evaluate cleanly must never produce a distribution document, so there are
//! no recovery or retry paths. Use [`user_friendly_error`] at the CLI boundary
//! to convert any error into a displayable context with suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use distforge::core::{DistforgeError, user_friendly_error};
//!
//! fn evaluate() -> Result<(), DistforgeError> {
//!     Err(DistforgeError::ManifestNotFound)
//! }
//!
//! if let Err(e) = evaluate() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // colored error with a suggestion
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::MANIFEST_FILENAME;

/// The main error type for distforge operations.
///
/// Each variant represents a specific failure mode with enough context to
/// tell the user which declaration, name or file caused it. Messages are
/// written for end users, not just developers.
#[derive(Error, Debug)]
pub enum DistforgeError {
    /// A dependency declaration string does not match the specifier grammar.
    ///
    /// Specifiers are a package name, optional bracketed extras, and an
    /// optional version constraint or `@` direct reference, e.g. `"torch"`,
    /// `"distilabel[vllm,ray]"`, `"trl==0.14"` or `"lighteval @ git+https://..."`.
    #[error("Invalid dependency specifier '{specifier}': {reason}")]
    InvalidSpecifier {
        /// The offending declaration string
        specifier: String,
        /// Why the specifier failed to parse
        reason: String,
    },

    /// Two declarations in the dependency list normalize to the same name.
    ///
    /// Silent last-write-wins would change the meaning of every extras group
    /// and the install list depending on declaration order, so duplicates
    /// are rejected outright.
    #[error("Duplicate dependency '{name}': declared as '{existing}' and '{duplicate}'")]
    DuplicateDependency {
        /// The normalized package name that collided
        name: String,
        /// The declaration seen first
        existing: String,
        /// The later declaration that collided with it
        duplicate: String,
    },

    /// A name requested by `install` or an extras group was never declared.
    #[error("Dependency '{name}' is not declared in the dependency list")]
    DependencyNotFound {
        /// The package name that could not be found in the catalog
        name: String,
    },

    /// A composite extras group includes a group that does not exist.
    #[error("Extras group '{name}' is not defined in [extras]")]
    ExtraNotFound {
        /// Name of the missing extras group
        name: String,
    },

    /// Composite extras groups include each other in a cycle.
    #[error("Circular extras composition detected: {chain}")]
    CircularExtras {
        /// The include chain showing the cycle
        chain: String,
    },

    /// Manifest file (distforge.toml) not found.
    ///
    /// distforge searches the current working directory and every parent
    /// directory up to the filesystem root, the way git locates `.git`.
    #[error("Manifest file distforge.toml not found in current directory or any parent directory")]
    ManifestNotFound,

    /// Manifest parsing error.
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Manifest validation error.
    #[error("Manifest validation failed: {reason}")]
    ManifestValidationError {
        /// Reason why manifest validation failed
        reason: String,
    },

    /// The readme referenced by `package.readme` does not exist.
    #[error("Readme file not found: {path}")]
    ReadmeNotFound {
        /// Path the manifest pointed at
        path: String,
    },

    /// File system error.
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied.
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for DistforgeError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidSpecifier {
                specifier,
                reason,
            } => Self::InvalidSpecifier {
                specifier: specifier.clone(),
                reason: reason.clone(),
            },
            Self::DuplicateDependency {
                name,
                existing,
                duplicate,
            } => Self::DuplicateDependency {
                name: name.clone(),
                existing: existing.clone(),
                duplicate: duplicate.clone(),
            },
            Self::DependencyNotFound {
                name,
            } => Self::DependencyNotFound {
                name: name.clone(),
            },
            Self::ExtraNotFound {
                name,
            } => Self::ExtraNotFound {
                name: name.clone(),
            },
            Self::CircularExtras {
                chain,
            } => Self::CircularExtras {
                chain: chain.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ManifestValidationError {
                reason,
            } => Self::ManifestValidationError {
                reason: reason.clone(),
            },
            Self::ReadmeNotFound {
                path,
            } => Self::ReadmeNotFound {
                path: path.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            // Non-cloneable sources degrade to their rendered message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::TomlSerError(e) => Self::Other {
                message: format!("TOML serialization error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`DistforgeError`] and adds an optional suggestion and details.
/// This is the primary way distforge presents errors in the CLI.
///
/// # Display Format
///
/// 1. **Error**: the main error message in red
/// 2. **Details**: additional context in yellow (optional)
/// 3. **Suggestion**: actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying distforge error
    pub error: DistforgeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DistforgeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions should be actionable steps the user can take; they are
    /// displayed in green to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// This is the entry point `main` uses to turn arbitrary `anyhow` errors
/// into CLI-displayable messages. It recognizes [`DistforgeError`] variants
/// as well as raw [`std::io::Error`] and [`toml::de::Error`] values and
/// attaches tailored guidance; anything else is reported with its full
/// error chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(forge_error) = error.downcast_ref::<DistforgeError>() {
        return create_error_context(forge_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DistforgeError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion(
                    "Check file ownership or re-run with sufficient permissions",
                )
                .with_details(
                    "distforge could not read or write a file it needs",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DistforgeError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DistforgeError::ManifestParseError {
            file: MANIFEST_FILENAME.to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in your distforge.toml. Verify quotes, brackets, and table headers",
        );
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DistforgeError::Other {
        message,
    })
}

/// Attach variant-specific suggestions and details to a typed error.
fn create_error_context(error: DistforgeError) -> ErrorContext {
    match &error {
        DistforgeError::ManifestNotFound => ErrorContext::new(error.clone())
            .with_suggestion("Run 'distforge init' to create a distforge.toml manifest")
            .with_details(
                "distforge searches for distforge.toml in the current directory and every parent directory",
            ),
        DistforgeError::InvalidSpecifier {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Specifiers are '<name>', '<name>[extras]', '<name><op><version>' or '<name> @ <url>', \
             e.g. 'torch', 'distilabel[vllm,ray]', 'trl==0.14' or 'lighteval @ git+https://...'",
        ),
        DistforgeError::DuplicateDependency {
            name,
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(format!(
            "Remove one of the '{name}' entries from the dependencies list"
        )),
        DistforgeError::DependencyNotFound {
            name,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Add a specifier for '{name}' to the dependencies list, or remove the reference"
            ))
            .with_details(
                "Every name used in 'install' or an [extras] group must appear in the master dependencies list",
            ),
        DistforgeError::ExtraNotFound {
            name,
        } => ErrorContext::new(error.clone()).with_suggestion(format!(
            "Define an [extras] group named '{name}' or fix the include list that references it"
        )),
        DistforgeError::CircularExtras {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Break the cycle by removing one of the include references"),
        DistforgeError::ManifestParseError {
            file,
            reason,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Fix the TOML syntax in {file}"))
            .with_details(reason.clone()),
        DistforgeError::ReadmeNotFound {
            path,
        } => ErrorContext::new(error.clone()).with_suggestion(format!(
            "Create '{path}' or point package.readme at an existing file"
        )),
        _ => ErrorContext::new(error.clone()),
    }
}
