//! distforge - Distribution manifest builder.
//!
//! distforge evaluates a declarative packaging manifest (`distforge.toml`)
//! for a Python-style distribution package into the document a packaging
//! tool consumes. From a flat list of dependency specifier strings it
//! produces a name-keyed lookup table, named optional dependency subsets
//! ("extras", including composite groups derived from other groups), the
//! mandatory base install list, and the fully rendered distribution
//! metadata with the long description read from the readme.
//!
//! # Architecture Overview
//!
//! Evaluation is a pure, synchronous, single-pass transformation over
//! static declarative data:
//!
//! 1. Parse each declaration with the specifier grammar
//!    ([`manifest::Specifier`])
//! 2. Index declarations by bare package name
//!    ([`manifest::DependencyCatalog`]); duplicates are rejected
//! 3. Resolve every extras group against the catalog, composites after the
//!    groups they include ([`manifest::resolve_extras`])
//! 4. Select the install requirements by name
//! 5. Render the distribution document ([`metadata::build_distribution`])
//!
//! The one filesystem side effect - removing a stale
//! `<package_name>.egg-info` directory - is an explicit operation
//! ([`artifacts::clean_stale_artifacts`]) invoked by the `build` and
//! `clean` commands, never an implicit consequence of loading a manifest.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface (`init`, `build`, `validate`, `list`,
//!   `clean`)
//! - [`core`] - error types and user-friendly error reporting
//! - [`manifest`] - manifest parsing, the specifier grammar, the dependency
//!   catalog, and extras resolution
//! - [`metadata`] - distribution document rendering
//! - [`artifacts`] - stale build-metadata cleanup
//! - [`utils`] - atomic file operations
//!
//! # Manifest Format (distforge.toml)
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
//!     "lighteval @ git+https://github.com/huggingface/lighteval.git@ed0848...",
//!     "trl",
//! ]
//!
//! install = ["accelerate", "trl"]
//!
//! [extras]
//! tests = ["pytest"]
//! eval = ["lighteval"]
//! dev = { include = ["tests", "eval"] }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Scaffold a manifest
//! distforge init
//!
//! # Check every declaration, group and the readme
//! distforge validate
//!
//! # Render the distribution document
//! distforge build --format json --output dist-metadata.json
//!
//! # Inspect the evaluated manifest
//! distforge list
//! distforge list --extras
//! ```

pub mod artifacts;
pub mod cli;
pub mod constants;
pub mod core;
pub mod manifest;
pub mod metadata;
pub mod utils;
