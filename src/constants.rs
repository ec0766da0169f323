//! Global constants used throughout the distforge codebase.
//!
//! Centralizing well-known filenames and fixed strings keeps them
//! discoverable and avoids drift between the CLI commands and the library.

/// Name of the manifest file distforge evaluates.
///
/// Discovered in the current directory or any parent directory, the same
/// way build tools locate their project files.
pub const MANIFEST_FILENAME: &str = "distforge.toml";

/// Suffix of the stale build-metadata directory removed before a build.
///
/// Python packaging tools generate `<package_name>.egg-info` next to the
/// manifest; a stale copy can break editable installs
/// (<https://github.com/pypa/pip/issues/5466>), so distforge removes it
/// before evaluating the manifest.
pub const METADATA_DIR_SUFFIX: &str = ".egg-info";

/// Default readme file consulted for the distribution long description.
pub const DEFAULT_README: &str = "README.md";

/// Content type reported for the long description.
pub const README_CONTENT_TYPE: &str = "text/markdown";
